//! Shop commands

use anyhow::{bail, Result};

use grindstone::economy::shop::{SkinId, SkinSpec, UtilityId, UtilitySpec, SKINS, UTILITIES};

use super::Context;

/// List skins and utilities at their effective (discounted) prices.
pub fn list_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let profile = engine.profile();
    let discount = engine.shop_discount();

    if discount > 0.0 {
        println!("Current discount: {:.0}%\n", discount * 100.0);
    }

    println!("Skins:");
    for spec in SKINS {
        let owned = profile.owned_skins.contains(&spec.id);
        let equipped = profile.equipped_skin == Some(spec.id);
        let tag = if equipped {
            "equipped"
        } else if owned {
            "owned"
        } else {
            ""
        };
        println!(
            "  {} - ${:.0} (level {}) {}",
            spec.name,
            spec.cost * (1.0 - discount.min(0.9)),
            spec.required_level,
            tag
        );
    }

    println!("\nUtilities:");
    for spec in UTILITIES {
        let ready_ms = profile
            .utility_cooldowns
            .get(&spec.id)
            .copied()
            .unwrap_or(0);
        let cooldown = if ready_ms > now_ms {
            format!("(cooldown {} min)", (ready_ms - now_ms) / 60_000)
        } else {
            String::new()
        };
        println!(
            "  {} - ${:.0} (level {}) {}",
            spec.name,
            spec.cost * (1.0 - discount.min(0.9)),
            spec.required_level,
            cooldown
        );
    }

    ctx.save(&engine)?;
    Ok(())
}

pub fn buy_skin_command(ctx: &Context, name: &str) -> Result<()> {
    let Some(id) = SkinId::from_str(name) else {
        bail!("Unknown skin: {}", name);
    };
    let mut engine = ctx.engine()?;
    engine.buy_skin(id)?;
    println!("Bought {}.", SkinSpec::get(id).name);
    ctx.save(&engine)?;
    Ok(())
}

pub fn equip_command(ctx: &Context, name: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    if name == "none" {
        engine.equip_skin(None)?;
        println!("Back to the default skin.");
    } else {
        let Some(id) = SkinId::from_str(name) else {
            bail!("Unknown skin: {}", name);
        };
        engine.equip_skin(Some(id))?;
        println!("Equipped {}.", SkinSpec::get(id).name);
    }
    ctx.save(&engine)?;
    Ok(())
}

pub fn buy_utility_command(ctx: &Context, name: &str) -> Result<()> {
    let Some(id) = UtilityId::from_str(name) else {
        bail!("Unknown utility: {}", name);
    };
    let mut engine = ctx.engine()?;
    engine.buy_utility(id)?;
    println!("{} used.", UtilitySpec::get(id).name);
    ctx.save(&engine)?;
    Ok(())
}
