//! Engine facade
//!
//! Owns the in-memory profile and wires the subsystems together. Every
//! mutating operation first runs [`Engine::poll`], which settles all
//! timestamp-derived transitions (daily rotation, bond generation and
//! maturity, offer expiry, a due hard reset) from stored timestamps plus a
//! single clock read. Polling frequency never changes the outcome.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::achievements::{self, AchievementId};
use crate::clock::Clock;
use crate::daily::{self, ChallengeKind, OfferEffect};
use crate::economy::bonds::{self, RiskTier};
use crate::economy::business::{self, BusinessId};
use crate::economy::shop::{self, SkinId, UtilityEffect, UtilityId};
use crate::error::{Blocked, EngineError};
use crate::profile::UserProfile;
use crate::progression::{self, StudyOutcome};
use crate::reset;
use crate::session::{self, SessionKind, SessionRecord};
use crate::skills::{self, FeatureKey, SkillId};

/// Discount granted by an active shop-sale offer.
const OFFER_SALE_DISCOUNT: f64 = 0.25;

/// Things that happened during an engine call, for the caller to surface.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    HardResetExecuted,
    DayRotated,
    BondBatchGenerated,
    BondMatured { risk: RiskTier, delta: f64 },
    OfferExpired,
    LevelUp { old_level: u32, new_level: u32 },
    StreakExtended { days: u32 },
    AchievementUnlocked(AchievementId),
}

/// Result of recording a session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub minutes: u32,
    pub study: StudyOutcome,
    pub events: Vec<EngineEvent>,
}

/// The progression & idle-economy engine over one profile.
pub struct Engine<C: Clock> {
    clock: C,
    rng: StdRng,
    profile: UserProfile,
}

impl<C: Clock> Engine<C> {
    pub fn new(profile: UserProfile, clock: C) -> Self {
        Self {
            clock,
            rng: StdRng::from_entropy(),
            profile,
        }
    }

    /// Deterministic bond/rotation sampling, for tests and debugging.
    pub fn with_seed(profile: UserProfile, clock: C, seed: u64) -> Self {
        Self {
            clock,
            rng: StdRng::seed_from_u64(seed),
            profile,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn into_profile(self) -> UserProfile {
        self.profile
    }

    /// Replace the whole profile (the validated raw-import surface).
    pub fn replace_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    /// Settle every timestamp-derived transition. Safe to call at any
    /// frequency: all math is a delta against stored timestamps.
    pub fn poll(&mut self) -> Vec<EngineEvent> {
        let now_ms = self.clock.now_ms();
        let today = self.clock.today();
        let mut events = Vec::new();

        if reset::execute_hard_reset_if_due(&mut self.profile, now_ms) {
            events.push(EngineEvent::HardResetExecuted);
        }
        if daily::rotate_if_needed(&mut self.profile, today, &mut self.rng) {
            events.push(EngineEvent::DayRotated);
        }
        if bonds::generation_due(&self.profile, now_ms) {
            bonds::generate_batch(&mut self.profile, now_ms, &mut self.rng);
            events.push(EngineEvent::BondBatchGenerated);
        }
        for resolution in bonds::claim_matured(&mut self.profile, now_ms) {
            events.push(EngineEvent::BondMatured {
                risk: resolution.risk,
                delta: resolution.delta,
            });
        }
        if daily::expire_offer(&mut self.profile, now_ms) {
            events.push(EngineEvent::OfferExpired);
        }
        self.reevaluate_achievements(&mut events);

        events
    }

    /// Record a completed timer session: validate, update the streak,
    /// convert minutes to XP/cash, advance challenges, re-check
    /// achievements.
    pub fn record_session(
        &mut self,
        record: SessionRecord,
    ) -> Result<SessionOutcome, EngineError> {
        let mut events = self.poll();
        let now_ms = self.clock.now_ms();
        let today = self.clock.today();

        let minutes = session::validate(&self.profile, &record, today)?;

        if record.kind == SessionKind::Manual {
            *self
                .profile
                .manual_minutes_by_day
                .entry(today)
                .or_insert(0) += minutes;
        }
        self.profile.lifetime.total_sessions += 1;

        let prev_streak = self.profile.current_streak;
        progression::update_streak(&mut self.profile, today);
        if self.profile.current_streak > prev_streak {
            events.push(EngineEvent::StreakExtended {
                days: self.profile.current_streak,
            });
        }

        let offer = daily::active_offer_effect(&self.profile, now_ms);
        let study = progression::apply_study(&mut self.profile, minutes, offer);
        if study.leveled_up() {
            events.push(EngineEvent::LevelUp {
                old_level: study.old_level,
                new_level: study.new_level,
            });
        }

        daily::update_challenge_progress(
            &mut self.profile,
            ChallengeKind::FocusMinutes,
            minutes,
            false,
        );
        daily::update_challenge_progress(&mut self.profile, ChallengeKind::Sessions, 1, false);
        daily::update_challenge_progress(
            &mut self.profile,
            ChallengeKind::CashEarned,
            study.cash_gained.floor() as u32,
            false,
        );

        self.reevaluate_achievements(&mut events);

        Ok(SessionOutcome {
            minutes,
            study,
            events,
        })
    }

    // === Skills ===

    pub fn can_unlock_skill(&self, id: SkillId) -> Result<(), Blocked> {
        skills::can_unlock(id, &self.profile)
    }

    pub fn unlock_skill(&mut self, id: SkillId) -> Result<(), EngineError> {
        self.poll();
        skills::unlock(id, &mut self.profile)?;
        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
        Ok(())
    }

    pub fn is_feature_unlocked(&self, feature: FeatureKey) -> bool {
        skills::is_feature_unlocked(feature, &self.profile)
    }

    // === Businesses ===

    pub fn unlock_business(&mut self, id: BusinessId) -> Result<(), EngineError> {
        self.poll();
        business::unlock(&mut self.profile, id, self.clock.now_ms())?;
        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
        Ok(())
    }

    pub fn upgrade_business(&mut self, id: BusinessId) -> Result<(), EngineError> {
        self.poll();
        business::upgrade(&mut self.profile, id)?;
        Ok(())
    }

    /// Collect one business. Returns the net amount credited.
    pub fn collect_business(&mut self, id: BusinessId) -> Result<f64, EngineError> {
        self.poll();
        let net = business::collect(&mut self.profile, id, self.clock.now())?;
        self.note_collection(net);
        Ok(net)
    }

    /// Collect every unlocked business. Returns the total credited.
    pub fn collect_all(&mut self) -> f64 {
        self.poll();
        let now = self.clock.now();
        let ids: Vec<BusinessId> = self
            .profile
            .businesses
            .iter()
            .filter(|(_, state)| state.unlocked)
            .map(|(id, _)| *id)
            .collect();

        let mut total = 0.0;
        for id in ids {
            if let Ok(net) = business::collect(&mut self.profile, id, now) {
                self.note_collection(net);
                total += net;
            }
        }
        total
    }

    fn note_collection(&mut self, net: f64) {
        daily::update_challenge_progress(&mut self.profile, ChallengeKind::Collections, 1, false);
        daily::update_challenge_progress(
            &mut self.profile,
            ChallengeKind::CashEarned,
            net.floor() as u32,
            false,
        );
        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
    }

    // === Bonds ===

    pub fn buy_bond(&mut self, id: uuid::Uuid) -> Result<(), EngineError> {
        self.poll();
        let now_ms = self.clock.now_ms();
        bonds::buy(&mut self.profile, id, now_ms, &mut self.rng)?;
        Ok(())
    }

    // === Shop ===

    pub fn buy_skin(&mut self, id: SkinId) -> Result<(), EngineError> {
        self.poll();
        let discount = self.shop_discount();
        shop::buy_skin(&mut self.profile, id, discount)?;
        Ok(())
    }

    pub fn equip_skin(&mut self, id: Option<SkinId>) -> Result<(), EngineError> {
        shop::equip_skin(&mut self.profile, id)?;
        Ok(())
    }

    pub fn buy_utility(&mut self, id: UtilityId) -> Result<UtilityEffect, EngineError> {
        self.poll();
        let now_ms = self.clock.now_ms();
        let discount = self.shop_discount();
        let effect = shop::buy_utility(&mut self.profile, id, now_ms, discount)?;

        match effect {
            UtilityEffect::BonusXp(xp) => {
                progression::grant_xp(&mut self.profile, xp as f64);
            }
            UtilityEffect::CollectAll => {
                self.collect_all();
            }
            UtilityEffect::StreakShield => {
                self.profile.streak_shield_armed = true;
            }
        }

        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
        Ok(effect)
    }

    /// Combined fractional shop discount: skills plus any active sale.
    pub fn shop_discount(&self) -> f64 {
        let mut discount = self.profile.skill_shop_discount();
        if daily::active_offer_effect(&self.profile, self.clock.now_ms())
            == Some(OfferEffect::ShopSale)
        {
            discount += OFFER_SALE_DISCOUNT;
        }
        discount
    }

    // === Daily content ===

    pub fn select_offer(&mut self, id: &str) -> Result<(), EngineError> {
        self.poll();
        daily::select_offer(&mut self.profile, id, self.clock.now_ms())?;
        Ok(())
    }

    /// Claim a completed challenge. Returns (xp, cash) granted.
    pub fn claim_challenge(&mut self, kind: ChallengeKind) -> Result<(u64, f64), EngineError> {
        self.poll();
        let (xp, cash) = daily::claim_challenge(&mut self.profile, kind)?;
        progression::grant_xp(&mut self.profile, xp as f64);
        self.profile.cash += cash;
        self.profile.lifetime.cash_earned += cash;
        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
        Ok((xp, cash))
    }

    // === Resets ===

    pub fn request_hard_reset(&mut self) -> Result<(), EngineError> {
        reset::request_hard_reset(&mut self.profile, self.clock.now_ms())?;
        Ok(())
    }

    pub fn cancel_hard_reset(&mut self) -> Result<(), EngineError> {
        reset::cancel_hard_reset(&mut self.profile)?;
        Ok(())
    }

    pub fn go_infamous(&mut self) -> Result<(), EngineError> {
        self.poll();
        reset::go_infamous(&mut self.profile)?;
        let mut events = Vec::new();
        self.reevaluate_achievements(&mut events);
        Ok(())
    }

    fn reevaluate_achievements(&mut self, events: &mut Vec<EngineEvent>) {
        for id in achievements::reevaluate(&mut self.profile) {
            events.push(EngineEvent::AchievementUnlocked(id));
        }
    }
}
