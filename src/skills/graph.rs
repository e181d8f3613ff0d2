//! Skill tree validation and unlocking
//!
//! Unlock preconditions are checked in a fixed order so the reported reason
//! is deterministic: already-unlocked, then level, then prerequisites, then
//! cost. `unlock` re-runs the full check at apply time, so two rapid unlock
//! attempts within one tick cannot both spend the same points.

use tracing::info;

use super::catalog::{FeatureKey, Skill, SkillId, Tree};
use crate::error::Blocked;
use crate::profile::UserProfile;

/// Check whether a skill can be unlocked right now. Returns the first
/// unmet condition.
pub fn can_unlock(id: SkillId, profile: &UserProfile) -> Result<(), Blocked> {
    let skill = Skill::get(id);

    let (unlocked, points, level) = match skill.tree {
        Tree::Main => (
            &profile.unlocked_skills,
            profile.skill_points,
            profile.level,
        ),
        Tree::Infamy => (
            &profile.unlocked_infamy_skills,
            profile.infamy_points,
            profile.infamy_level,
        ),
    };

    if unlocked.contains(&id) {
        return Err(Blocked::AlreadyUnlocked);
    }

    if let Some(required) = skill.prerequisite_level {
        if level < required {
            return Err(match skill.tree {
                Tree::Main => Blocked::LevelTooLow {
                    required,
                    current: level,
                },
                Tree::Infamy => Blocked::InfamyLevelTooLow {
                    required,
                    current: level,
                },
            });
        }
    }

    for prereq in skill.prerequisites {
        if !unlocked.contains(prereq) {
            return Err(Blocked::MissingPrerequisite {
                name: Skill::get(*prereq).name,
            });
        }
    }

    if points < skill.cost {
        return Err(match skill.tree {
            Tree::Main => Blocked::InsufficientSkillPoints {
                cost: skill.cost,
                available: points,
            },
            Tree::Infamy => Blocked::InsufficientInfamyPoints {
                cost: skill.cost,
                available: points,
            },
        });
    }

    Ok(())
}

/// Unlock a skill: deduct its cost and add it to the unlocked set.
/// Atomic: on any error the profile is untouched.
pub fn unlock(id: SkillId, profile: &mut UserProfile) -> Result<(), Blocked> {
    can_unlock(id, profile)?;

    let skill = Skill::get(id);
    match skill.tree {
        Tree::Main => {
            profile.skill_points -= skill.cost;
            profile.unlocked_skills.insert(id);
        }
        Tree::Infamy => {
            profile.infamy_points -= skill.cost;
            profile.unlocked_infamy_skills.insert(id);
        }
    }

    info!(skill = skill.name, "skill unlocked");
    Ok(())
}

/// Pure feature-gate lookup: unlocked iff always visible or some unlocked
/// skill declares the feature.
pub fn is_feature_unlocked(feature: FeatureKey, profile: &UserProfile) -> bool {
    if feature.always_visible() {
        return true;
    }
    profile
        .unlocked_skills
        .iter()
        .chain(profile.unlocked_infamy_skills.iter())
        .any(|id| Skill::get(*id).unlocks_feature == Some(feature))
}
