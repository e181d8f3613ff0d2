//! Business commands

use anyhow::{bail, Result};

use grindstone::economy::business::{self, BusinessId, BusinessSpec, BUSINESSES};

use super::Context;

fn parse_id(name: &str) -> Result<BusinessId> {
    match BusinessId::from_str(name) {
        Some(id) => Ok(id),
        None => bail!("Unknown business: {}", name),
    }
}

/// List every business with level, income rate, and pending collection.
pub fn list_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let profile = engine.profile();

    for spec in BUSINESSES {
        let state = profile.businesses.get(&spec.id);
        let unlocked = state.is_some_and(|s| s.unlocked);
        if !unlocked {
            println!(
                "[locked] {} - ${:.0} to buy, ${:.0}/hr gross",
                spec.name, spec.unlock_cost, spec.base_income
            );
            continue;
        }
        let level = state.map(|s| s.level).unwrap_or(1);
        let pending = business::pending_income(profile, spec.id, now_ms);
        print!(
            "{} (lvl {}/{}) - ${:.0}/hr gross, ${:.2} pending",
            spec.name,
            level,
            spec.max_level,
            spec.gross_hourly_income(level),
            pending
        );
        if level < spec.max_level {
            print!(", upgrade ${:.0}", spec.upgrade_cost(level));
        }
        println!();
    }

    ctx.save(&engine)?;
    Ok(())
}

pub fn unlock_command(ctx: &Context, name: &str) -> Result<()> {
    let id = parse_id(name)?;
    let mut engine = ctx.engine()?;
    engine.unlock_business(id)?;
    println!("Bought {}. Income starts accruing now.", BusinessSpec::get(id).name);
    ctx.save(&engine)?;
    Ok(())
}

pub fn upgrade_command(ctx: &Context, name: &str) -> Result<()> {
    let id = parse_id(name)?;
    let mut engine = ctx.engine()?;
    engine.upgrade_business(id)?;
    let level = engine
        .profile()
        .businesses
        .get(&id)
        .map(|s| s.level)
        .unwrap_or(1);
    println!("{} is now level {}.", BusinessSpec::get(id).name, level);
    ctx.save(&engine)?;
    Ok(())
}

pub fn collect_command(ctx: &Context, name: &str) -> Result<()> {
    let id = parse_id(name)?;
    let mut engine = ctx.engine()?;
    let net = engine.collect_business(id)?;
    println!("Collected ${:.2} from {}.", net, BusinessSpec::get(id).name);
    ctx.save(&engine)?;
    Ok(())
}

pub fn collect_all_command(ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine()?;
    let total = engine.collect_all();
    println!("Collected ${:.2} in total.", total);
    ctx.save(&engine)?;
    Ok(())
}
