//! Profile import/export commands

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use grindstone::ProfileStore;

use super::Context;

/// Print the profile as JSON to stdout.
pub fn export_command(ctx: &Context) -> Result<()> {
    let profile = ctx.store().load()?;
    println!("{}", ProfileStore::export_json(&profile)?);
    Ok(())
}

/// Replace the profile from a JSON file. The import is validated and any
/// stale derived fields are recomputed before the profile is written.
pub fn import_command(ctx: &Context, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let profile = ProfileStore::import_json(&raw)?;
    ctx.store().save(&profile)?;
    println!("Profile imported.");
    Ok(())
}
