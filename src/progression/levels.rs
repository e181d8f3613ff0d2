//! XP and level system
//!
//! Level thresholds are derived from focus time: reaching level 2 takes 25
//! minutes of focus, and each subsequent level takes 5 minutes more than
//! the one before, converted to XP at the fixed per-minute rate. The table
//! is built once, is strictly increasing, and caps at level 100.

use once_cell::sync::Lazy;

/// XP granted per focused minute, before multipliers.
pub const XP_PER_MINUTE: f64 = 10.0;

/// Cash granted per full 5 minutes of focus, before multipliers.
pub const CASH_PER_5_MIN: f64 = 50.0;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 100;

/// Focus minutes required to go from level 1 to level 2.
const BASE_MINUTES_TO_LEVEL: u64 = 25;

/// Additional focus minutes required per subsequent level.
const MINUTES_INCREMENT_PER_LEVEL: u64 = 5;

/// `THRESHOLDS[i]` is the XP required to *be* level `i + 1`. Level 1 sits
/// at 0 XP; the table is strictly increasing by construction.
static THRESHOLDS: Lazy<Vec<u64>> = Lazy::new(|| {
    let mut thresholds = Vec::with_capacity(MAX_LEVEL as usize);
    let mut xp = 0u64;
    thresholds.push(0);
    for level in 1..MAX_LEVEL as u64 {
        let minutes = BASE_MINUTES_TO_LEVEL + MINUTES_INCREMENT_PER_LEVEL * (level - 1);
        xp += minutes * XP_PER_MINUTE as u64;
        thresholds.push(xp);
    }
    thresholds
});

/// Level for a given XP total: the largest threshold at or below `xp`,
/// capped at [`MAX_LEVEL`].
pub fn level_for(xp: f64) -> u32 {
    let mut level = 1u32;
    for (i, threshold) in THRESHOLDS.iter().enumerate() {
        if xp >= *threshold as f64 {
            level = i as u32 + 1;
        } else {
            break;
        }
    }
    level
}

/// XP required to be the given level (None beyond the cap).
pub fn xp_for_level(level: u32) -> Option<u64> {
    if level == 0 || level > MAX_LEVEL {
        return None;
    }
    Some(THRESHOLDS[(level - 1) as usize])
}

/// Title for a level band.
pub fn title_for(level: u32) -> &'static str {
    match level {
        0..=4 => "Novice",
        5..=9 => "Apprentice",
        10..=19 => "Scholar",
        20..=29 => "Adept",
        30..=39 => "Specialist",
        40..=49 => "Strategist",
        50..=64 => "Expert",
        65..=79 => "Virtuoso",
        80..=94 => "Mastermind",
        95..=99 => "Grandmaster",
        _ => "Kingpin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_strictly_increasing() {
        for pair in THRESHOLDS.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(THRESHOLDS.len(), MAX_LEVEL as usize);
    }

    #[test]
    fn test_level_boundaries() {
        // Level 2 takes 25 minutes = 250 XP.
        assert_eq!(level_for(0.0), 1);
        assert_eq!(level_for(249.0), 1);
        assert_eq!(level_for(250.0), 2);
        // Level 3 takes 30 more minutes = 550 XP total.
        assert_eq!(level_for(549.0), 2);
        assert_eq!(level_for(550.0), 3);
    }

    #[test]
    fn test_level_caps_at_max() {
        let top = *THRESHOLDS.last().unwrap() as f64;
        assert_eq!(level_for(top), MAX_LEVEL);
        assert_eq!(level_for(top * 100.0), MAX_LEVEL);
    }

    #[test]
    fn test_level_for_monotone() {
        let mut last = 0;
        for xp in (0..300_000).step_by(137) {
            let level = level_for(xp as f64);
            assert!(level >= last, "level_for must be non-decreasing");
            last = level;
        }
    }

    #[test]
    fn test_xp_for_level_inverts_table() {
        for level in 1..=MAX_LEVEL {
            let xp = xp_for_level(level).unwrap();
            assert_eq!(level_for(xp as f64), level);
        }
        assert_eq!(xp_for_level(0), None);
        assert_eq!(xp_for_level(MAX_LEVEL + 1), None);
    }
}
