//! Achievements: static catalog, pure predicates, exactly-once unlocks

mod checker;
mod definitions;

pub use definitions::{Achievement, AchievementId, Category, ACHIEVEMENTS};

use tracing::info;

use crate::profile::UserProfile;

/// Re-evaluate every predicate against the current profile and unlock
/// whatever newly holds. The cash reward is granted exactly once per id:
/// the unlocked set is the guard.
pub fn reevaluate(profile: &mut UserProfile) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    for id in checker::satisfied(profile) {
        if profile.unlocked_achievements.contains(&id) {
            continue;
        }
        profile.unlocked_achievements.insert(id);
        let achievement = Achievement::get(id);
        profile.cash += achievement.cash_reward;
        profile.lifetime.cash_earned += achievement.cash_reward;
        info!(achievement = achievement.name, "achievement unlocked");
        newly_unlocked.push(id);
    }

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_granted_exactly_once() {
        let mut profile = UserProfile::default();
        profile.lifetime.total_sessions = 1;

        let first = reevaluate(&mut profile);
        assert_eq!(first, vec![AchievementId::FirstSession]);
        let cash = profile.cash;
        assert!(cash > 0.0);

        // Predicate still holds, but the unlock and reward never repeat.
        let second = reevaluate(&mut profile);
        assert!(second.is_empty());
        assert_eq!(profile.cash, cash);
    }

    #[test]
    fn test_multiple_unlocks_in_one_pass() {
        let mut profile = UserProfile::default();
        profile.lifetime.total_sessions = 10;
        profile.lifetime.total_focus_minutes = 700;

        let unlocked = reevaluate(&mut profile);
        assert!(unlocked.len() >= 3);
    }
}
