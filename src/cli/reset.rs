//! Reset and prestige commands

use anyhow::Result;

use grindstone::reset::{hard_reset_remaining_ms, HARD_RESET_DELAY_MS};

use super::Context;

pub fn request_command(ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine()?;
    engine.request_hard_reset()?;
    println!(
        "Hard reset requested. It wipes EVERYTHING in {} minutes.",
        HARD_RESET_DELAY_MS / 60_000
    );
    println!("Run `grindstone reset cancel` to change your mind.");
    ctx.save(&engine)?;
    Ok(())
}

pub fn cancel_command(ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine()?;
    engine.cancel_hard_reset()?;
    println!("Hard reset canceled.");
    ctx.save(&engine)?;
    Ok(())
}

pub fn status_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    match hard_reset_remaining_ms(engine.profile(), now_ms) {
        Some(remaining) => println!(
            "Hard reset pending: fires in {} seconds.",
            remaining / 1_000
        ),
        None => println!("No reset pending."),
    }
    ctx.save(&engine)?;
    Ok(())
}

pub fn infamy_command(ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine()?;
    engine.go_infamous()?;
    let profile = engine.profile();
    println!(
        "You are infamous. Infamy level {}, {} infamy points to spend.",
        profile.infamy_level, profile.infamy_points
    );
    ctx.save(&engine)?;
    Ok(())
}
