//! Resets: the delayed hard reset and the Infamy prestige
//!
//! A hard reset is a deferred transition: requesting it only records a
//! timestamp, cancelling clears it, and the wipe happens when a later poll
//! observes the delay elapsed with no cancellation. Infamy is immediate and
//! irreversible: the cash economy resets, permanent unlocks survive.

use tracing::{info, warn};

use crate::error::Blocked;
use crate::profile::UserProfile;
use crate::progression::{title_for, MAX_LEVEL};

/// Grace window between requesting a hard reset and it executing.
pub const HARD_RESET_DELAY_MS: i64 = 10 * 60 * 1000;

/// Record a hard-reset request. Nothing is wiped yet.
pub fn request_hard_reset(profile: &mut UserProfile, now_ms: i64) -> Result<(), Blocked> {
    if profile.hard_reset_requested_ms.is_some() {
        return Err(Blocked::ResetAlreadyPending);
    }
    profile.hard_reset_requested_ms = Some(now_ms);
    warn!("hard reset requested; executes in 10 minutes unless cancelled");
    Ok(())
}

/// Cancel a pending hard reset. Allowed any time before execution.
pub fn cancel_hard_reset(profile: &mut UserProfile) -> Result<(), Blocked> {
    if profile.hard_reset_requested_ms.take().is_none() {
        return Err(Blocked::NoResetPending);
    }
    info!("hard reset cancelled");
    Ok(())
}

/// Milliseconds until a pending reset executes (zero once due).
pub fn hard_reset_remaining_ms(profile: &UserProfile, now_ms: i64) -> Option<i64> {
    profile
        .hard_reset_requested_ms
        .map(|requested| (requested + HARD_RESET_DELAY_MS - now_ms).max(0))
}

/// Execute the wipe if the delay has elapsed. Returns true when the
/// profile was reset to defaults.
pub fn execute_hard_reset_if_due(profile: &mut UserProfile, now_ms: i64) -> bool {
    match profile.hard_reset_requested_ms {
        Some(requested) if now_ms >= requested + HARD_RESET_DELAY_MS => {
            *profile = UserProfile::default();
            warn!("hard reset executed; profile wiped");
            true
        }
        _ => false,
    }
}

/// The Infamy prestige. Requires max level. Resets the cash economy
/// (level, xp, cash, businesses, bonds, active offer) and grants one
/// infamy point and level; skills, achievements, skins, and streaks
/// survive.
pub fn go_infamous(profile: &mut UserProfile) -> Result<(), Blocked> {
    if profile.level < MAX_LEVEL {
        return Err(Blocked::InfamyRequiresMaxLevel {
            current: profile.level,
        });
    }

    profile.xp = 0.0;
    profile.level = 1;
    profile.title = title_for(1).to_string();
    profile.cash = 0.0;
    profile.businesses.clear();
    profile.bonds.clear();
    profile.last_bond_generation_ms = 0;
    profile.daily.active_offer = None;

    profile.infamy_points += 1;
    profile.infamy_level += 1;
    info!(infamy_level = profile.infamy_level, "gone infamous");
    Ok(())
}
