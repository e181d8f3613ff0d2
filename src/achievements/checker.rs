//! Achievement predicates
//!
//! Every predicate reads lifetime aggregates off the profile, never
//! incremental deltas, so a freshly loaded profile evaluates identically to
//! one that lived through every mutation.

use super::definitions::AchievementId;
use crate::economy::business::BUSINESSES;
use crate::profile::UserProfile;

/// All achievements whose condition currently holds, whether or not they
/// are already unlocked. Callers diff against the unlocked set.
pub fn satisfied(profile: &UserProfile) -> Vec<AchievementId> {
    let mut out = Vec::new();

    let minutes = profile.lifetime.total_focus_minutes;
    let study_milestones = [
        (AchievementId::FirstSession, profile.lifetime.total_sessions >= 1),
        (AchievementId::DedicatedHour, minutes >= 60),
        (AchievementId::TenHours, minutes >= 600),
        (AchievementId::FiftyHours, minutes >= 3_000),
        (AchievementId::HundredHours, minutes >= 6_000),
    ];

    let level_milestones = [
        (AchievementId::Level10, profile.level >= 10),
        (AchievementId::Level25, profile.level >= 25),
        (AchievementId::Level50, profile.level >= 50),
        (AchievementId::Level100, profile.level >= 100),
    ];

    let best_streak = profile.longest_streak.max(profile.current_streak);
    let streaks = [
        (AchievementId::Streak3, best_streak >= 3),
        (AchievementId::Streak7, best_streak >= 7),
        (AchievementId::Streak30, best_streak >= 30),
    ];

    let owned_businesses = profile
        .businesses
        .values()
        .filter(|b| b.unlocked)
        .count();
    let empire = [
        (AchievementId::FirstBusiness, owned_businesses >= 1),
        (AchievementId::FullPortfolio, owned_businesses >= BUSINESSES.len()),
        (
            AchievementId::HundredCollections,
            profile.lifetime.business_collections >= 100,
        ),
    ];

    let market = [
        (AchievementId::FirstBond, profile.lifetime.bonds_matured >= 1),
        (AchievementId::BondBaron, profile.lifetime.bonds_matured >= 10),
    ];

    let skills_unlocked =
        profile.unlocked_skills.len() + profile.unlocked_infamy_skills.len();
    let misc = [
        (
            AchievementId::Millionaire,
            profile.lifetime.cash_earned >= 1_000_000.0,
        ),
        (AchievementId::SkillCollector, skills_unlocked >= 8),
        (AchievementId::Infamous, profile.infamy_level >= 1),
    ];

    for (id, holds) in study_milestones
        .into_iter()
        .chain(level_milestones)
        .chain(streaks)
        .chain(empire)
        .chain(market)
        .chain(misc)
    {
        if holds {
            out.push(id);
        }
    }

    out
}
