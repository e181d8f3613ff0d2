//! Daily challenge and offer commands

use anyhow::{bail, Result};

use grindstone::daily::{ChallengeKind, OfferEffect};

use super::Context;

fn effect_label(effect: OfferEffect) -> &'static str {
    match effect {
        OfferEffect::DoubleXp => "double XP from sessions",
        OfferEffect::DoubleCash => "double cash from sessions",
        OfferEffect::ShopSale => "25% off the shop",
    }
}

/// Show today's board.
pub fn show_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let profile = engine.profile();

    println!("Challenges:");
    for challenge in &profile.daily.challenges {
        let status = if challenge.reward_claimed {
            "claimed"
        } else if challenge.is_completed() {
            "ready to claim!"
        } else {
            ""
        };
        println!(
            "  [{}] {}/{} - {} XP, ${:.0} {}",
            challenge.kind.as_str(),
            challenge.current.min(challenge.target),
            challenge.target,
            challenge.xp_reward,
            challenge.cash_reward,
            status
        );
    }

    match &profile.daily.active_offer {
        Some(active) if active.is_active(now_ms) => {
            println!(
                "\nActive offer: {} ({} min left)",
                effect_label(active.effect),
                (active.end_ms - now_ms) / 60_000
            );
        }
        _ => {
            println!("\nOffers (pick one):");
            for offer in &profile.daily.offers {
                println!(
                    "  {} - {} for {} min",
                    offer.id,
                    effect_label(offer.effect),
                    offer.duration_minutes
                );
            }
        }
    }

    ctx.save(&engine)?;
    Ok(())
}

pub fn claim_command(ctx: &Context, kind: &str) -> Result<()> {
    let Some(kind) = ChallengeKind::from_str(kind) else {
        bail!("Unknown challenge kind: {}", kind);
    };
    let mut engine = ctx.engine()?;
    let (xp, cash) = engine.claim_challenge(kind)?;
    println!("Claimed: +{} XP, +${:.0}", xp, cash);
    ctx.save(&engine)?;
    Ok(())
}

pub fn offer_command(ctx: &Context, id: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    engine.select_offer(id)?;
    println!("Offer activated.");
    ctx.save(&engine)?;
    Ok(())
}
