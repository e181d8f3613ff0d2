//! Wall-clock abstraction
//!
//! The engine never reads the system time directly. Every operation that
//! depends on time takes it from a [`Clock`], so accrual and expiry logic
//! can be driven by a fixed clock in tests.

use std::cell::Cell;

use chrono::{DateTime, Local, NaiveDate};

/// The only external time source the engine consumes.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Local>;

    /// Current time as Unix milliseconds (the persisted timestamp format).
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// The user's local calendar day. Streaks and daily rotation key off
    /// this, not UTC midnight.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for tests. Time only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Start at a fixed reference instant (2024-03-04 09:00 local, a Monday).
    pub fn default_start() -> Self {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        Self::new(dt)
    }

    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }

    pub fn advance(&self, duration: chrono::Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (*self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::default_start();
        let before = clock.now_ms();
        clock.advance(chrono::Duration::hours(2));
        assert_eq!(clock.now_ms(), before + 2 * 3600 * 1000);
    }

    #[test]
    fn test_today_follows_clock() {
        let clock = FixedClock::default_start();
        let day = clock.today();
        clock.advance(chrono::Duration::days(1));
        assert_eq!(clock.today(), day.succ_opt().unwrap());
    }
}
