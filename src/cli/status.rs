//! Status command implementation

use anyhow::Result;

use grindstone::economy::business::{self, BUSINESSES};
use grindstone::skills::FeatureKey;

use super::Context;

/// Show the profile at a glance.
pub fn status_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let profile = engine.profile();

    println!(
        "{} - level {} ({:.0} XP)",
        profile.title, profile.level, profile.xp
    );
    println!("Cash: ${:.2}", profile.cash);
    println!(
        "Streak: {} days (best {})",
        profile.current_streak, profile.longest_streak
    );
    println!("Skill points: {}", profile.skill_points);
    if profile.infamy_level > 0 {
        println!(
            "Infamy: level {} ({} points to spend)",
            profile.infamy_level, profile.infamy_points
        );
    }

    if engine.is_feature_unlocked(FeatureKey::Businesses) {
        let mut pending = 0.0;
        for spec in BUSINESSES {
            if let Some(state) = profile.businesses.get(&spec.id) {
                if state.unlocked {
                    pending += business::pending_income(profile, spec.id, now_ms);
                }
            }
        }
        if pending > 0.0 {
            println!("Pending business income: ${:.2}", pending);
        }
    }

    let claimable = profile
        .daily
        .challenges
        .iter()
        .filter(|c| c.is_completed() && !c.reward_claimed)
        .count();
    if claimable > 0 {
        println!("Challenges ready to claim: {}", claimable);
    }

    println!(
        "Lifetime: {} sessions, {} focus minutes, ${:.0} earned",
        profile.lifetime.total_sessions,
        profile.lifetime.total_focus_minutes,
        profile.lifetime.cash_earned
    );

    ctx.save(&engine)?;
    Ok(())
}
