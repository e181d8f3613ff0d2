//! Skill trees: static catalogs plus prerequisite-gated unlocking

mod catalog;
mod graph;

pub use catalog::{Boost, FeatureKey, Skill, SkillId, Tree, SKILLS};
pub use graph::{can_unlock, is_feature_unlocked, unlock};
