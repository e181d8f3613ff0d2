//! Idle businesses
//!
//! Income accrues continuously from wall-clock time: every calculation is a
//! delta between `last_collected_ms` and the current clock read, never a
//! tick count, so accrual is correct across restarts and suspended
//! processes. Each business carries a "gimmick", a named collection-time
//! modifier resolved per business id.

use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Blocked;
use crate::profile::UserProfile;

/// Income growth factor per upgrade level.
pub const INCOME_GROWTH_PER_LEVEL: f64 = 1.15;

/// Upgrade cost growth factor per level.
const UPGRADE_COST_GROWTH: f64 = 1.6;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Unique identifier for each business.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BusinessId {
    CoffeeCart,
    Bookstore,
    InternetCafe,
    Arcade,
    CoworkingSpace,
}

impl BusinessId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoffeeCart => "coffee_cart",
            Self::Bookstore => "bookstore",
            Self::InternetCafe => "internet_cafe",
            Self::Arcade => "arcade",
            Self::CoworkingSpace => "coworking_space",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        BUSINESSES.iter().map(|b| b.id).find(|id| id.as_str() == s)
    }

    pub fn all() -> impl Iterator<Item = BusinessId> {
        BUSINESSES.iter().map(|b| b.id)
    }
}

/// Collection-time modifier, keyed per business id in the catalog rather
/// than scattered through callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gimmick {
    /// No modifier.
    Steady,
    /// +50% when collected between 06:00 and 10:59 local.
    MorningRush,
    /// +25% when collected on a Saturday or Sunday.
    WeekendCrowd,
    /// +40% when collected between 22:00 and 04:59 local.
    NightSurge,
    /// Flat +100 whenever the net collection reaches 500.
    Jackpot,
}

impl Gimmick {
    /// Apply the modifier to a net collection amount at collection time.
    pub fn apply(&self, net: f64, at: DateTime<Local>) -> f64 {
        match self {
            Self::Steady => net,
            Self::MorningRush => {
                if (6..=10).contains(&at.hour()) {
                    net * 1.5
                } else {
                    net
                }
            }
            Self::WeekendCrowd => {
                if matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
                    net * 1.25
                } else {
                    net
                }
            }
            Self::NightSurge => {
                if at.hour() >= 22 || at.hour() <= 4 {
                    net * 1.4
                } else {
                    net
                }
            }
            Self::Jackpot => {
                if net >= 500.0 {
                    net + 100.0
                } else {
                    net
                }
            }
        }
    }
}

/// Static business definition.
#[derive(Debug, Clone)]
pub struct BusinessSpec {
    pub id: BusinessId,
    pub name: &'static str,
    /// Gross income per hour at level 1.
    pub base_income: f64,
    /// Upkeep charged per elapsed hour at collection (0 for none).
    pub maintenance_per_hour: f64,
    pub unlock_cost: f64,
    /// Cost of the level 1 -> 2 upgrade; grows by a fixed factor per level.
    pub base_upgrade_cost: f64,
    pub max_level: u32,
    pub gimmick: Gimmick,
}

/// All business definitions, cheapest first.
pub static BUSINESSES: &[BusinessSpec] = &[
    BusinessSpec {
        id: BusinessId::CoffeeCart,
        name: "Coffee Cart",
        base_income: 60.0,
        maintenance_per_hour: 0.0,
        unlock_cost: 500.0,
        base_upgrade_cost: 400.0,
        max_level: 25,
        gimmick: Gimmick::MorningRush,
    },
    BusinessSpec {
        id: BusinessId::Bookstore,
        name: "Bookstore",
        base_income: 150.0,
        maintenance_per_hour: 20.0,
        unlock_cost: 2_500.0,
        base_upgrade_cost: 1_500.0,
        max_level: 25,
        gimmick: Gimmick::WeekendCrowd,
    },
    BusinessSpec {
        id: BusinessId::InternetCafe,
        name: "Internet Cafe",
        base_income: 400.0,
        maintenance_per_hour: 80.0,
        unlock_cost: 10_000.0,
        base_upgrade_cost: 6_000.0,
        max_level: 25,
        gimmick: Gimmick::NightSurge,
    },
    BusinessSpec {
        id: BusinessId::Arcade,
        name: "Arcade",
        base_income: 900.0,
        maintenance_per_hour: 150.0,
        unlock_cost: 40_000.0,
        base_upgrade_cost: 20_000.0,
        max_level: 25,
        gimmick: Gimmick::Jackpot,
    },
    BusinessSpec {
        id: BusinessId::CoworkingSpace,
        name: "Coworking Space",
        base_income: 2_500.0,
        maintenance_per_hour: 600.0,
        unlock_cost: 150_000.0,
        base_upgrade_cost: 75_000.0,
        max_level: 25,
        gimmick: Gimmick::Steady,
    },
];

impl BusinessSpec {
    pub fn get(id: BusinessId) -> &'static BusinessSpec {
        BUSINESSES
            .iter()
            .find(|b| b.id == id)
            .expect("all business ids are defined in the catalog")
    }

    /// Gross income per hour at the given level.
    pub fn gross_hourly_income(&self, level: u32) -> f64 {
        self.base_income * INCOME_GROWTH_PER_LEVEL.powi(level.saturating_sub(1) as i32)
    }

    /// Cost of the upgrade from `level` to `level + 1`, whole dollars.
    pub fn upgrade_cost(&self, level: u32) -> f64 {
        (self.base_upgrade_cost * UPGRADE_COST_GROWTH.powi(level.saturating_sub(1) as i32))
            .round()
    }
}

/// Per-user business state (the static spec lives in the catalog).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessState {
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Unix millis of the last collection (accrual starts here).
    #[serde(default)]
    pub last_collected_ms: i64,
}

fn default_level() -> u32 {
    1
}

impl Default for BusinessState {
    fn default() -> Self {
        Self {
            unlocked: false,
            level: 1,
            last_collected_ms: 0,
        }
    }
}

/// Gross accrual between two timestamps for a business at a level.
pub fn accrued_between(spec: &BusinessSpec, level: u32, from_ms: i64, to_ms: i64) -> f64 {
    let elapsed_ms = (to_ms - from_ms).max(0);
    spec.gross_hourly_income(level) * (elapsed_ms as f64 / MS_PER_HOUR)
}

/// Pending gross income for an unlocked business at `now` (display helper;
/// does not mutate anything).
pub fn pending_income(profile: &UserProfile, id: BusinessId, now_ms: i64) -> f64 {
    let Some(state) = profile.businesses.get(&id) else {
        return 0.0;
    };
    if !state.unlocked {
        return 0.0;
    }
    accrued_between(BusinessSpec::get(id), state.level, state.last_collected_ms, now_ms)
}

/// Collect accrued income: gross minus maintenance for the elapsed hours,
/// gimmick applied, floored at zero, credited to cash. Resets the accrual
/// window, so a second collect at the same instant yields nothing.
pub fn collect(
    profile: &mut UserProfile,
    id: BusinessId,
    now: DateTime<Local>,
) -> Result<f64, Blocked> {
    let spec = BusinessSpec::get(id);
    let now_ms = now.timestamp_millis();

    let state = profile.businesses.entry(id).or_default();
    if !state.unlocked {
        return Err(Blocked::BusinessLocked);
    }

    let elapsed_ms = (now_ms - state.last_collected_ms).max(0);
    let elapsed_hours = elapsed_ms as f64 / MS_PER_HOUR;
    let gross = spec.gross_hourly_income(state.level) * elapsed_hours;
    let net = gross - spec.maintenance_per_hour * elapsed_hours;
    let net = spec.gimmick.apply(net, now).max(0.0);

    state.last_collected_ms = now_ms;
    profile.cash += net;
    profile.lifetime.cash_earned += net;
    profile.lifetime.business_collections += 1;

    debug!(business = spec.name, amount = net, "income collected");
    Ok(net)
}

/// Unlock a business for its cash cost.
pub fn unlock(
    profile: &mut UserProfile,
    id: BusinessId,
    now_ms: i64,
) -> Result<(), Blocked> {
    let spec = BusinessSpec::get(id);

    if profile.businesses.get(&id).is_some_and(|s| s.unlocked) {
        return Err(Blocked::AlreadyOwned);
    }
    if profile.cash < spec.unlock_cost {
        return Err(Blocked::InsufficientCash {
            cost: spec.unlock_cost,
            available: profile.cash,
        });
    }

    profile.cash -= spec.unlock_cost;
    let state = profile.businesses.entry(id).or_default();
    state.unlocked = true;
    state.level = 1;
    // Accrual starts at the moment of purchase.
    state.last_collected_ms = now_ms;

    debug!(business = spec.name, "business unlocked");
    Ok(())
}

/// Upgrade an unlocked business by one level, paying the current upgrade
/// cost. The next upgrade is strictly more expensive.
pub fn upgrade(profile: &mut UserProfile, id: BusinessId) -> Result<(), Blocked> {
    let spec = BusinessSpec::get(id);

    let cash = profile.cash;
    let Some(state) = profile.businesses.get_mut(&id) else {
        return Err(Blocked::BusinessLocked);
    };
    if !state.unlocked {
        return Err(Blocked::BusinessLocked);
    }
    if state.level >= spec.max_level {
        return Err(Blocked::BusinessMaxLevel);
    }
    let cost = spec.upgrade_cost(state.level);
    if cash < cost {
        return Err(Blocked::InsufficientCash {
            cost,
            available: cash,
        });
    }

    state.level += 1;
    let level = state.level;
    profile.cash -= cost;

    debug!(business = spec.name, level, "business upgraded");
    Ok(())
}
