//! Study command implementation

use anyhow::{bail, Result};

use grindstone::session::{SessionKind, SessionRecord};

use super::{print_events, Context};

/// Record a completed focus session.
pub fn study_command(ctx: &Context, minutes: u32, kind: &str) -> Result<()> {
    let Some(kind) = SessionKind::from_str(kind) else {
        bail!("Unknown session kind: {} (try pomodoro, stopwatch, countdown, or manual)", kind);
    };

    let mut engine = ctx.engine()?;
    let now_ms = chrono::Local::now().timestamp_millis();
    let record = SessionRecord {
        kind,
        start_ms: now_ms - i64::from(minutes) * 60_000,
        duration_seconds: i64::from(minutes) * 60,
    };

    let outcome = engine.record_session(record)?;
    println!(
        "Logged {} focused minutes: +{:.1} XP, +${:.2}",
        outcome.minutes, outcome.study.xp_gained, outcome.study.cash_gained
    );
    print_events(&outcome.events);

    ctx.save(&engine)?;
    Ok(())
}
