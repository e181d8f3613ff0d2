//! Daily content rotation: challenges and offers
//!
//! Both boards regenerate when the stored day key no longer matches the
//! current local calendar day. Regeneration replaces the lists wholesale,
//! resetting progress and claim flags, and clears the active offer.

mod challenges;
mod offers;

pub use challenges::{sample_challenges, ChallengeKind, DailyChallenge, CHALLENGES_PER_DAY};
pub use offers::{sample_offers, ActiveOffer, DailyOffer, OfferEffect, OFFERS_PER_DAY};

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Blocked;
use crate::profile::UserProfile;

/// Per-day rotating state on the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyState {
    /// Local calendar day the boards were generated for.
    #[serde(default)]
    pub day_key: Option<NaiveDate>,
    #[serde(default)]
    pub challenges: Vec<DailyChallenge>,
    #[serde(default)]
    pub offers: Vec<DailyOffer>,
    #[serde(default)]
    pub active_offer: Option<ActiveOffer>,
}

/// Regenerate both boards if the stored day key is stale. Returns whether a
/// rotation happened.
pub fn rotate_if_needed<R: Rng>(profile: &mut UserProfile, today: NaiveDate, rng: &mut R) -> bool {
    if profile.daily.day_key == Some(today) {
        return false;
    }

    profile.daily.day_key = Some(today);
    profile.daily.challenges = sample_challenges(rng);
    profile.daily.offers = sample_offers(rng);
    // An offer never outlives its day.
    profile.daily.active_offer = None;
    // The manual-entry cap only needs today's tally.
    profile.manual_minutes_by_day.retain(|day, _| *day == today);

    debug!(%today, "daily boards rotated");
    true
}

/// Advance (or set) progress on today's challenge of the given kind.
/// `is_absolute` replaces the counter instead of accumulating.
pub fn update_challenge_progress(
    profile: &mut UserProfile,
    kind: ChallengeKind,
    value: u32,
    is_absolute: bool,
) {
    for challenge in &mut profile.daily.challenges {
        if challenge.kind != kind {
            continue;
        }
        if is_absolute {
            challenge.current = value;
        } else {
            challenge.current = challenge.current.saturating_add(value);
        }
    }
}

/// Claim a completed challenge's reward. One-shot: completion is derived,
/// the claim flag is checked-then-set in the same call.
pub fn claim_challenge(
    profile: &mut UserProfile,
    kind: ChallengeKind,
) -> Result<(u64, f64), Blocked> {
    let challenge = profile
        .daily
        .challenges
        .iter_mut()
        .find(|c| c.kind == kind)
        .ok_or(Blocked::UnknownChallenge)?;

    if !challenge.is_completed() {
        return Err(Blocked::ChallengeIncomplete);
    }
    if challenge.reward_claimed {
        return Err(Blocked::RewardAlreadyClaimed);
    }

    challenge.reward_claimed = true;
    let rewards = (challenge.xp_reward, challenge.cash_reward);
    profile.lifetime.challenges_claimed += 1;
    Ok(rewards)
}

/// Activate one of today's offers. Blocked while another offer is active
/// and unexpired; the selection stands until it lapses or the day rotates.
pub fn select_offer(profile: &mut UserProfile, id: &str, now_ms: i64) -> Result<(), Blocked> {
    if let Some(active) = &profile.daily.active_offer {
        if active.is_active(now_ms) {
            return Err(Blocked::OfferAlreadyActive);
        }
    }

    let offer = profile
        .daily
        .offers
        .iter()
        .find(|o| o.id == id)
        .ok_or(Blocked::UnknownOffer)?;

    profile.daily.active_offer = Some(ActiveOffer {
        id: offer.id.clone(),
        effect: offer.effect,
        end_ms: now_ms + offer.duration_minutes as i64 * 60_000,
    });
    profile.lifetime.offers_taken += 1;
    Ok(())
}

/// The effect currently in force, if any.
pub fn active_offer_effect(profile: &UserProfile, now_ms: i64) -> Option<OfferEffect> {
    profile
        .daily
        .active_offer
        .as_ref()
        .filter(|a| a.is_active(now_ms))
        .map(|a| a.effect)
}

/// Drop an active offer whose window has elapsed. Returns true if one was
/// cleared.
pub fn expire_offer(profile: &mut UserProfile, now_ms: i64) -> bool {
    match &profile.daily.active_offer {
        Some(active) if !active.is_active(now_ms) => {
            profile.daily.active_offer = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn rotated_profile() -> UserProfile {
        let mut profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(rotate_if_needed(&mut profile, day(4), &mut rng));
        profile
    }

    #[test]
    fn test_rotation_only_on_day_change() {
        let mut profile = rotated_profile();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(!rotate_if_needed(&mut profile, day(4), &mut rng));
        assert!(rotate_if_needed(&mut profile, day(5), &mut rng));
    }

    #[test]
    fn test_rotation_resets_progress_and_offer() {
        let mut profile = rotated_profile();
        let kind = profile.daily.challenges[0].kind;
        update_challenge_progress(&mut profile, kind, 999, false);
        let offer_id = profile.daily.offers[0].id.clone();
        select_offer(&mut profile, &offer_id, 0).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        rotate_if_needed(&mut profile, day(5), &mut rng);
        assert!(profile.daily.active_offer.is_none());
        assert!(profile.daily.challenges.iter().all(|c| c.current == 0));
        assert!(profile.daily.challenges.iter().all(|c| !c.reward_claimed));
    }

    #[test]
    fn test_absolute_vs_accumulating_progress() {
        let mut profile = rotated_profile();
        let kind = profile.daily.challenges[0].kind;
        update_challenge_progress(&mut profile, kind, 5, false);
        update_challenge_progress(&mut profile, kind, 5, false);
        assert_eq!(challenge_current(&profile, kind), 10);
        update_challenge_progress(&mut profile, kind, 3, true);
        assert_eq!(challenge_current(&profile, kind), 3);
    }

    #[test]
    fn test_claim_is_one_shot() {
        let mut profile = rotated_profile();
        let kind = profile.daily.challenges[0].kind;
        assert_eq!(
            claim_challenge(&mut profile, kind),
            Err(Blocked::ChallengeIncomplete)
        );

        let target = profile.daily.challenges[0].target;
        update_challenge_progress(&mut profile, kind, target, true);
        assert!(claim_challenge(&mut profile, kind).is_ok());
        assert_eq!(
            claim_challenge(&mut profile, kind),
            Err(Blocked::RewardAlreadyClaimed)
        );
    }

    #[test]
    fn test_single_active_offer() {
        let mut profile = rotated_profile();
        let first = profile.daily.offers[0].id.clone();
        let second = profile.daily.offers[1].id.clone();

        select_offer(&mut profile, &first, 0).unwrap();
        assert_eq!(
            select_offer(&mut profile, &second, 1_000),
            Err(Blocked::OfferAlreadyActive)
        );

        // After the window lapses a new selection is allowed.
        let end = profile.daily.active_offer.as_ref().unwrap().end_ms;
        assert!(select_offer(&mut profile, &second, end).is_ok());
    }

    #[test]
    fn test_expire_offer() {
        let mut profile = rotated_profile();
        let id = profile.daily.offers[0].id.clone();
        select_offer(&mut profile, &id, 0).unwrap();
        let end = profile.daily.active_offer.as_ref().unwrap().end_ms;

        assert!(!expire_offer(&mut profile, end - 1));
        assert!(expire_offer(&mut profile, end));
        assert!(profile.daily.active_offer.is_none());
    }

    fn challenge_current(profile: &UserProfile, kind: ChallengeKind) -> u32 {
        profile
            .daily
            .challenges
            .iter()
            .find(|c| c.kind == kind)
            .unwrap()
            .current
    }
}
