//! Achievement definitions and metadata
//!
//! All achievements are defined here with their categories and cash rewards.
//! Unlock conditions live in `checker.rs` as pure predicates over lifetime
//! aggregates.

use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    // Study milestones
    FirstSession,
    DedicatedHour,
    TenHours,
    FiftyHours,
    HundredHours,
    // Level milestones
    Level10,
    Level25,
    Level50,
    Level100,
    // Streaks
    Streak3,
    Streak7,
    Streak30,
    // Empire
    FirstBusiness,
    FullPortfolio,
    HundredCollections,
    // Bond market
    FirstBond,
    BondBaron,
    // Wealth
    Millionaire,
    // Skills
    SkillCollector,
    // Prestige
    Infamous,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSession => "first_session",
            Self::DedicatedHour => "dedicated_hour",
            Self::TenHours => "ten_hours",
            Self::FiftyHours => "fifty_hours",
            Self::HundredHours => "hundred_hours",
            Self::Level10 => "level_10",
            Self::Level25 => "level_25",
            Self::Level50 => "level_50",
            Self::Level100 => "level_100",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::FirstBusiness => "first_business",
            Self::FullPortfolio => "full_portfolio",
            Self::HundredCollections => "hundred_collections",
            Self::FirstBond => "first_bond",
            Self::BondBaron => "bond_baron",
            Self::Millionaire => "millionaire",
            Self::SkillCollector => "skill_collector",
            Self::Infamous => "infamous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ACHIEVEMENTS
            .iter()
            .map(|a| a.id)
            .find(|id| id.as_str() == s)
    }
}

/// Display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Study,
    Level,
    Streak,
    Empire,
    Market,
    Wealth,
    Skills,
    Prestige,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Level => "Level",
            Self::Streak => "Streak",
            Self::Empire => "Empire",
            Self::Market => "Market",
            Self::Wealth => "Wealth",
            Self::Skills => "Skills",
            Self::Prestige => "Prestige",
        }
    }
}

/// Achievement definition.
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub cash_reward: f64,
}

/// All achievement definitions.
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstSession,
        name: "First Session",
        description: "Log your first focus session",
        category: Category::Study,
        cash_reward: 100.0,
    },
    Achievement {
        id: AchievementId::DedicatedHour,
        name: "Dedicated Hour",
        description: "Log 1 hour of focus, total",
        category: Category::Study,
        cash_reward: 150.0,
    },
    Achievement {
        id: AchievementId::TenHours,
        name: "Ten Hours",
        description: "Log 10 hours of focus, total",
        category: Category::Study,
        cash_reward: 500.0,
    },
    Achievement {
        id: AchievementId::FiftyHours,
        name: "Fifty Hours",
        description: "Log 50 hours of focus, total",
        category: Category::Study,
        cash_reward: 2_000.0,
    },
    Achievement {
        id: AchievementId::HundredHours,
        name: "Hundred Hours",
        description: "Log 100 hours of focus, total",
        category: Category::Study,
        cash_reward: 5_000.0,
    },
    Achievement {
        id: AchievementId::Level10,
        name: "Double Digits",
        description: "Reach level 10",
        category: Category::Level,
        cash_reward: 500.0,
    },
    Achievement {
        id: AchievementId::Level25,
        name: "Quarter Century",
        description: "Reach level 25",
        category: Category::Level,
        cash_reward: 1_500.0,
    },
    Achievement {
        id: AchievementId::Level50,
        name: "Halfway There",
        description: "Reach level 50",
        category: Category::Level,
        cash_reward: 5_000.0,
    },
    Achievement {
        id: AchievementId::Level100,
        name: "The Summit",
        description: "Reach level 100",
        category: Category::Level,
        cash_reward: 20_000.0,
    },
    Achievement {
        id: AchievementId::Streak3,
        name: "Warming Up",
        description: "Hit a 3-day study streak",
        category: Category::Streak,
        cash_reward: 200.0,
    },
    Achievement {
        id: AchievementId::Streak7,
        name: "Full Week",
        description: "Hit a 7-day study streak",
        category: Category::Streak,
        cash_reward: 750.0,
    },
    Achievement {
        id: AchievementId::Streak30,
        name: "Iron Month",
        description: "Hit a 30-day study streak",
        category: Category::Streak,
        cash_reward: 5_000.0,
    },
    Achievement {
        id: AchievementId::FirstBusiness,
        name: "Open for Business",
        description: "Unlock your first business",
        category: Category::Empire,
        cash_reward: 250.0,
    },
    Achievement {
        id: AchievementId::FullPortfolio,
        name: "Full Portfolio",
        description: "Own every business",
        category: Category::Empire,
        cash_reward: 10_000.0,
    },
    Achievement {
        id: AchievementId::HundredCollections,
        name: "Daily Rounds",
        description: "Collect business income 100 times",
        category: Category::Empire,
        cash_reward: 2_500.0,
    },
    Achievement {
        id: AchievementId::FirstBond,
        name: "First Bond",
        description: "See a bond through to maturity",
        category: Category::Market,
        cash_reward: 300.0,
    },
    Achievement {
        id: AchievementId::BondBaron,
        name: "Bond Baron",
        description: "See 10 bonds through to maturity",
        category: Category::Market,
        cash_reward: 3_000.0,
    },
    Achievement {
        id: AchievementId::Millionaire,
        name: "Millionaire",
        description: "Earn $1,000,000 across your career",
        category: Category::Wealth,
        cash_reward: 25_000.0,
    },
    Achievement {
        id: AchievementId::SkillCollector,
        name: "Skill Collector",
        description: "Unlock 8 skills",
        category: Category::Skills,
        cash_reward: 1_000.0,
    },
    Achievement {
        id: AchievementId::Infamous,
        name: "Infamous",
        description: "Go infamous for the first time",
        category: Category::Prestige,
        cash_reward: 1_000.0,
    },
];

impl Achievement {
    /// Get an achievement definition by id.
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("all achievement ids are defined in the catalog")
    }
}
