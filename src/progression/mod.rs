//! Progression engine: XP, levels, streaks, study rewards

pub mod levels;

pub use levels::{level_for, title_for, xp_for_level, CASH_PER_5_MIN, MAX_LEVEL, XP_PER_MINUTE};

use chrono::NaiveDate;
use tracing::info;

use crate::daily::OfferEffect;
use crate::profile::UserProfile;

/// Streak bonus added to both the XP and cash multipliers: 1% per streak
/// day, clamped at 20%.
pub fn streak_bonus(current_streak: u32) -> f64 {
    (current_streak as f64 * 0.01).min(0.20)
}

/// Cash granted for every level crossed, per level: `level * 500`.
const CASH_PER_LEVEL_CROSSED: f64 = 500.0;

/// Skill points granted per level crossed.
const SKILL_POINTS_PER_LEVEL: u32 = 1;

/// Result of a study application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyOutcome {
    pub xp_gained: f64,
    pub cash_gained: f64,
    pub old_level: u32,
    pub new_level: u32,
}

impl StudyOutcome {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Add XP and settle level-up rewards. Rewards apply per intermediate
/// level: crossing three levels at once grants three skill points and the
/// per-level cash for each crossed level, exactly as three single-level
/// crossings would.
pub fn grant_xp(profile: &mut UserProfile, amount: f64) -> (u32, u32) {
    let old_level = profile.level;
    profile.xp += amount.max(0.0);
    let new_level = level_for(profile.xp);

    for crossed in (old_level + 1)..=new_level {
        profile.skill_points += SKILL_POINTS_PER_LEVEL;
        let reward = crossed as f64 * CASH_PER_LEVEL_CROSSED;
        profile.cash += reward;
        profile.lifetime.cash_earned += reward;
    }

    profile.level = new_level;
    profile.title = title_for(new_level).to_string();

    if new_level > old_level {
        info!(old_level, new_level, "level up");
    }
    (old_level, new_level)
}

/// Convert focused minutes into XP and cash. Zero minutes is a no-op, not
/// an error. `offer` is whatever offer is active at the time of the
/// session, already resolved by the caller.
pub fn apply_study(
    profile: &mut UserProfile,
    minutes: u32,
    offer: Option<OfferEffect>,
) -> StudyOutcome {
    if minutes == 0 {
        return StudyOutcome {
            old_level: profile.level,
            new_level: profile.level,
            ..StudyOutcome::default()
        };
    }

    let bonus = streak_bonus(profile.current_streak);
    let mut xp_mult = 1.0 + bonus + profile.skill_xp_boost();
    let mut cash_mult = 1.0 + bonus + profile.skill_cash_boost();
    match offer {
        Some(OfferEffect::DoubleXp) => xp_mult += 1.0,
        Some(OfferEffect::DoubleCash) => cash_mult += 1.0,
        _ => {}
    }

    let xp_gained = minutes as f64 * XP_PER_MINUTE * xp_mult;
    let cash_gained = (minutes / 5) as f64 * CASH_PER_5_MIN * cash_mult;

    let (old_level, new_level) = grant_xp(profile, xp_gained);
    profile.cash += cash_gained;
    profile.lifetime.cash_earned += cash_gained;
    profile.lifetime.total_focus_minutes += minutes as u64;

    StudyOutcome {
        xp_gained,
        cash_gained,
        old_level,
        new_level,
    }
}

/// Update the daily streak for a session on `session_day` (the user's
/// local calendar day). Consecutive day extends, same day is a no-op,
/// a gap resets to 1, unless a streak shield is armed, which absorbs
/// one reset and extends instead.
pub fn update_streak(profile: &mut UserProfile, session_day: NaiveDate) {
    match profile.last_study_day {
        Some(last) if last == session_day => {}
        Some(last) if last.succ_opt() == Some(session_day) => {
            profile.current_streak += 1;
        }
        Some(_) if profile.streak_shield_armed => {
            profile.streak_shield_armed = false;
            profile.current_streak += 1;
            info!("streak shield consumed");
        }
        _ => {
            profile.current_streak = 1;
        }
    }

    profile.last_study_day = Some(session_day);
    profile.longest_streak = profile.longest_streak.max(profile.current_streak);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_streak_bonus_clamped() {
        assert_eq!(streak_bonus(0), 0.0);
        assert_eq!(streak_bonus(5), 0.05);
        assert_eq!(streak_bonus(20), 0.20);
        assert_eq!(streak_bonus(1000), 0.20);
    }

    #[test]
    fn test_spec_scenario_streak_five() {
        // 30 minutes at streak 5, no skill boosts: 30 * 10 * 1.05 = 315.
        let mut profile = UserProfile::default();
        profile.current_streak = 5;
        let outcome = apply_study(&mut profile, 30, None);
        assert!((outcome.xp_gained - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_minutes_is_noop() {
        let mut profile = UserProfile::default();
        let outcome = apply_study(&mut profile, 0, None);
        assert_eq!(outcome.xp_gained, 0.0);
        assert_eq!(profile.xp, 0.0);
        assert_eq!(profile.lifetime.total_focus_minutes, 0);
    }

    #[test]
    fn test_study_additive_in_minutes() {
        let mut split = UserProfile::default();
        split.current_streak = 3;
        apply_study(&mut split, 25, None);
        apply_study(&mut split, 35, None);

        let mut whole = UserProfile::default();
        whole.current_streak = 3;
        apply_study(&mut whole, 60, None);

        assert!((split.xp - whole.xp).abs() < 1e-6);
        assert!((split.cash - whole.cash).abs() < 1e-6);
        assert_eq!(split.level, whole.level);
        assert_eq!(split.skill_points, whole.skill_points);
    }

    #[test]
    fn test_rewards_per_intermediate_level() {
        let mut profile = UserProfile::default();
        // Enough XP to jump from level 1 straight past 2 and 3:
        // thresholds are 250 (lvl 2) and 550 (lvl 3).
        grant_xp(&mut profile, 600.0);
        assert_eq!(profile.level, 3);
        assert_eq!(profile.skill_points, 2);
        // 2*500 + 3*500 cash for the two crossed levels.
        assert!((profile.cash - 2_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_cash_floored_to_five_minute_blocks() {
        let mut profile = UserProfile::default();
        let outcome = apply_study(&mut profile, 9, None);
        // floor(9/5) = 1 block of 50.
        assert!((outcome.cash_gained - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_xp_offer() {
        let mut profile = UserProfile::default();
        let outcome = apply_study(&mut profile, 10, Some(OfferEffect::DoubleXp));
        assert!((outcome.xp_gained - 200.0).abs() < 1e-9);
        // Cash multiplier untouched by an XP offer.
        assert!((outcome.cash_gained - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_streak_rules() {
        let mut profile = UserProfile::default();

        update_streak(&mut profile, day(4));
        assert_eq!(profile.current_streak, 1);

        // Same day: unchanged.
        update_streak(&mut profile, day(4));
        assert_eq!(profile.current_streak, 1);

        // Next day: extends.
        update_streak(&mut profile, day(5));
        assert_eq!(profile.current_streak, 2);

        // Gap: resets.
        update_streak(&mut profile, day(8));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 2);
    }

    #[test]
    fn test_streak_shield_absorbs_one_reset() {
        let mut profile = UserProfile::default();
        update_streak(&mut profile, day(4));
        update_streak(&mut profile, day(5));
        profile.streak_shield_armed = true;

        // Two-day gap would normally reset to 1.
        update_streak(&mut profile, day(8));
        assert_eq!(profile.current_streak, 3);
        assert!(!profile.streak_shield_armed);

        // The next gap resets normally.
        update_streak(&mut profile, day(12));
        assert_eq!(profile.current_streak, 1);
    }

    #[test]
    fn test_title_tracks_level() {
        let mut profile = UserProfile::default();
        grant_xp(&mut profile, xp_for_level(10).unwrap() as f64);
        assert_eq!(profile.title, "Scholar");
    }
}
