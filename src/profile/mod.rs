//! The `UserProfile` aggregate
//!
//! Every piece of durable state lives in this one document. The engine
//! mutates it in memory; [`ProfileStore`] owns load/save. All fields are
//! defaulted so documents written by older versions keep loading.

mod store;

pub use store::ProfileStore;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::achievements::AchievementId;
use crate::daily::DailyState;
use crate::economy::bonds::Bond;
use crate::economy::business::{BusinessId, BusinessState};
use crate::economy::shop::{SkinId, UtilityId};
use crate::progression::{level_for, title_for};
use crate::skills::{Boost, Skill, SkillId};

/// Lifetime aggregates the achievement predicates read. These only ever
/// grow (a hard reset wipes the whole profile); they are totals, not
/// deltas, so predicates evaluate the same against a fresh load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeTotals {
    #[serde(default)]
    pub total_focus_minutes: u64,
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub business_collections: u64,
    #[serde(default)]
    pub bonds_matured: u32,
    /// Gross cash ever credited (spend does not reduce this).
    #[serde(default)]
    pub cash_earned: f64,
    #[serde(default)]
    pub challenges_claimed: u32,
    #[serde(default)]
    pub offers_taken: u32,
}

/// The single persisted aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub xp: f64,
    /// Cached `level_for(xp)`; healed on load if it drifts.
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub skill_points: u32,
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub unlocked_skills: BTreeSet<SkillId>,
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<AchievementId>,

    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_study_day: Option<NaiveDate>,
    /// One reset absorbed by the Streak Shield utility, if armed.
    #[serde(default)]
    pub streak_shield_armed: bool,

    #[serde(default)]
    pub businesses: BTreeMap<BusinessId, BusinessState>,
    #[serde(default)]
    pub bonds: Vec<Bond>,
    #[serde(default)]
    pub last_bond_generation_ms: i64,

    #[serde(default)]
    pub daily: DailyState,

    #[serde(default)]
    pub owned_skins: BTreeSet<SkinId>,
    #[serde(default)]
    pub equipped_skin: Option<SkinId>,
    #[serde(default)]
    pub owned_utilities: BTreeSet<UtilityId>,
    /// Absolute cooldown end per utility, Unix millis.
    #[serde(default)]
    pub utility_cooldowns: BTreeMap<UtilityId, i64>,

    #[serde(default)]
    pub infamy_points: u32,
    /// Total prestiges; unlike points this is never spent.
    #[serde(default)]
    pub infamy_level: u32,
    #[serde(default)]
    pub unlocked_infamy_skills: BTreeSet<SkillId>,

    /// Set while a hard reset is pending, Unix millis of the request.
    #[serde(default)]
    pub hard_reset_requested_ms: Option<i64>,

    /// Manual session minutes per local day, for the daily manual cap.
    /// Pruned to the current day on rotation.
    #[serde(default)]
    pub manual_minutes_by_day: BTreeMap<NaiveDate, u32>,

    #[serde(default)]
    pub lifetime: LifetimeTotals,

    /// Owned by the chat integration; carried opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
}

fn default_level() -> u32 {
    1
}

fn default_title() -> String {
    title_for(1).to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            xp: 0.0,
            level: 1,
            cash: 0.0,
            skill_points: 0,
            title: default_title(),
            unlocked_skills: BTreeSet::new(),
            unlocked_achievements: BTreeSet::new(),
            current_streak: 0,
            longest_streak: 0,
            last_study_day: None,
            streak_shield_armed: false,
            businesses: BTreeMap::new(),
            bonds: Vec::new(),
            last_bond_generation_ms: 0,
            daily: DailyState::default(),
            owned_skins: BTreeSet::new(),
            equipped_skin: None,
            owned_utilities: BTreeSet::new(),
            utility_cooldowns: BTreeMap::new(),
            infamy_points: 0,
            infamy_level: 0,
            unlocked_infamy_skills: BTreeSet::new(),
            hard_reset_requested_ms: None,
            manual_minutes_by_day: BTreeMap::new(),
            lifetime: LifetimeTotals::default(),
            gemini_api_key: None,
        }
    }
}

impl UserProfile {
    /// Sum of XP boosts from unlocked skills, both trees.
    pub fn skill_xp_boost(&self) -> f64 {
        self.boost_sum(|b| match b {
            Boost::Xp(v) => Some(v),
            _ => None,
        })
    }

    /// Sum of cash boosts from unlocked skills, both trees.
    pub fn skill_cash_boost(&self) -> f64 {
        self.boost_sum(|b| match b {
            Boost::Cash(v) => Some(v),
            _ => None,
        })
    }

    /// Sum of shop discounts from unlocked skills, both trees.
    pub fn skill_shop_discount(&self) -> f64 {
        self.boost_sum(|b| match b {
            Boost::ShopDiscount(v) => Some(v),
            _ => None,
        })
    }

    fn boost_sum(&self, pick: impl Fn(Boost) -> Option<f64>) -> f64 {
        self.unlocked_skills
            .iter()
            .chain(self.unlocked_infamy_skills.iter())
            .filter_map(|id| Skill::get(*id).boost)
            .filter_map(&pick)
            .sum()
    }

    /// Recompute cached derivations after a load or raw import. The level
    /// cache must equal `level_for(xp)`; anything else is drift from an
    /// older or hand-edited document and is repaired here.
    pub fn heal_invariants(&mut self) {
        let derived = level_for(self.xp);
        if self.level != derived {
            warn!(
                stored = self.level,
                derived, "stored level disagrees with xp; recomputing"
            );
            self.level = derived;
        }
        self.title = title_for(self.level).to_string();
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }
}
