//! Session ledger boundary
//!
//! Completed timer sessions enter the engine here. Validation happens
//! before anything mutates: non-positive durations are rejected outright,
//! and manual entries are capped per local calendar day so the economy
//! cannot be farmed by typing in hours.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::UserProfile;

/// Manual entries may total at most this many minutes per calendar day.
pub const MANUAL_DAILY_CAP_MINUTES: u32 = 240;

/// How a session was timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Pomodoro,
    Stopwatch,
    Countdown,
    Manual,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::Stopwatch => "stopwatch",
            Self::Countdown => "countdown",
            Self::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pomodoro" => Some(Self::Pomodoro),
            "stopwatch" => Some(Self::Stopwatch),
            "countdown" => Some(Self::Countdown),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// A completed timer session as reported by the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub kind: SessionKind,
    /// Unix millis when the session started.
    pub start_ms: i64,
    pub duration_seconds: i64,
}

impl SessionRecord {
    /// Whole focused minutes, rounded down.
    pub fn minutes(&self) -> u32 {
        (self.duration_seconds / 60).max(0) as u32
    }
}

/// Validate a record against the profile. Returns the focused minutes to
/// credit; the profile is untouched.
pub fn validate(
    profile: &UserProfile,
    record: &SessionRecord,
    session_day: chrono::NaiveDate,
) -> Result<u32, ValidationError> {
    if record.duration_seconds <= 0 {
        return Err(ValidationError::NonPositiveDuration);
    }

    let minutes = record.minutes();
    if record.kind == SessionKind::Manual {
        let logged = profile
            .manual_minutes_by_day
            .get(&session_day)
            .copied()
            .unwrap_or(0);
        if logged + minutes > MANUAL_DAILY_CAP_MINUTES {
            return Err(ValidationError::ManualCapExceeded {
                cap_minutes: MANUAL_DAILY_CAP_MINUTES,
                logged_minutes: logged,
            });
        }
    }

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn record(kind: SessionKind, seconds: i64) -> SessionRecord {
        SessionRecord {
            kind,
            start_ms: 0,
            duration_seconds: seconds,
        }
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let profile = UserProfile::default();
        for seconds in [0, -30] {
            let err = validate(&profile, &record(SessionKind::Pomodoro, seconds), day());
            assert_eq!(err, Err(ValidationError::NonPositiveDuration));
        }
    }

    #[test]
    fn test_minutes_floor() {
        assert_eq!(record(SessionKind::Pomodoro, 59).minutes(), 0);
        assert_eq!(record(SessionKind::Pomodoro, 60).minutes(), 1);
        assert_eq!(record(SessionKind::Pomodoro, 1_500).minutes(), 25);
    }

    #[test]
    fn test_manual_cap_counts_prior_entries() {
        let mut profile = UserProfile::default();
        profile.manual_minutes_by_day.insert(day(), 200);

        // 40 more minutes still fits the 240 cap.
        assert_eq!(
            validate(&profile, &record(SessionKind::Manual, 40 * 60), day()),
            Ok(40)
        );
        // 41 does not.
        assert_eq!(
            validate(&profile, &record(SessionKind::Manual, 41 * 60), day()),
            Err(ValidationError::ManualCapExceeded {
                cap_minutes: 240,
                logged_minutes: 200,
            })
        );
    }

    #[test]
    fn test_cap_only_applies_to_manual() {
        let mut profile = UserProfile::default();
        profile.manual_minutes_by_day.insert(day(), 240);
        assert_eq!(
            validate(&profile, &record(SessionKind::Stopwatch, 3 * 3600), day()),
            Ok(180)
        );
    }
}
