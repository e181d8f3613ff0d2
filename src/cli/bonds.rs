//! Bond commands

use anyhow::{bail, Result};

use super::Context;

/// Show this cycle's offerings and any purchased bonds awaiting maturity.
pub fn list_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let profile = engine.profile();

    let (held, available): (Vec<_>, Vec<_>) =
        profile.bonds.iter().partition(|b| b.purchased);

    if available.is_empty() {
        println!("No bonds on the market this cycle.");
    } else {
        println!("On the market:");
        for bond in available {
            println!(
                "  {} [{}] cost ${:.0}, pays ${:.0} on success, risks ${:.0} extra on default",
                &bond.id.to_string()[..8],
                bond.risk.as_str(),
                bond.cost,
                bond.potential_return,
                bond.potential_loss
            );
        }
    }

    if !held.is_empty() {
        println!("Held:");
        for bond in held {
            let remaining_min = bond
                .maturity_ms
                .map(|m| ((m - now_ms).max(0)) / 60_000)
                .unwrap_or(0);
            println!(
                "  {} [{}] matures in {} min",
                &bond.id.to_string()[..8],
                bond.risk.as_str(),
                remaining_min
            );
        }
    }

    ctx.save(&engine)?;
    Ok(())
}

/// Buy a bond by unambiguous id prefix.
pub fn buy_command(ctx: &Context, id_prefix: &str) -> Result<()> {
    let mut engine = ctx.engine()?;

    let matches: Vec<_> = engine
        .profile()
        .bonds
        .iter()
        .filter(|b| !b.purchased && b.id.to_string().starts_with(id_prefix))
        .map(|b| b.id)
        .collect();
    let id = match matches.as_slice() {
        [id] => *id,
        [] => bail!("No bond matches id prefix {}", id_prefix),
        _ => bail!("Bond id prefix {} is ambiguous", id_prefix),
    };

    engine.buy_bond(id)?;
    println!("Bond purchased. It matures in 2 hours.");

    ctx.save(&engine)?;
    Ok(())
}
