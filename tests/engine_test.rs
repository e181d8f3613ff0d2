//! End-to-end engine scenarios driven by a fixed clock and seeded rng.
//!
//! These exercise the cross-module flows: offline accrual settled at poll,
//! day rotation, the bond lifecycle, streaks across days, offers changing
//! session payouts, and both reset paths.

use chrono::Duration;

use grindstone::clock::{Clock, FixedClock};
use grindstone::daily::{ActiveOffer, ChallengeKind, DailyChallenge, DailyOffer, OfferEffect};
use grindstone::economy::business::BusinessId;
use grindstone::progression::xp_for_level;
use grindstone::session::{SessionKind, SessionRecord};
use grindstone::skills::SkillId;
use grindstone::{Blocked, Engine, EngineError, EngineEvent, UserProfile, ValidationError};

fn engine_at(clock: &FixedClock, profile: UserProfile) -> Engine<&FixedClock> {
    Engine::with_seed(profile, clock, 42)
}

/// The sampled board holds 3 of the 4 challenge kinds; assert whichever
/// session-driven counters are present.
fn assert_board_progress(profile: &UserProfile, focus_minutes: u32, sessions: u32) {
    for challenge in &profile.daily.challenges {
        match challenge.kind {
            ChallengeKind::FocusMinutes => assert_eq!(challenge.current, focus_minutes),
            ChallengeKind::Sessions => assert_eq!(challenge.current, sessions),
            ChallengeKind::Collections => assert_eq!(challenge.current, 0),
            ChallengeKind::CashEarned => {}
        }
    }
}

fn session(minutes: u32) -> SessionRecord {
    SessionRecord {
        kind: SessionKind::Pomodoro,
        start_ms: 0,
        duration_seconds: i64::from(minutes) * 60,
    }
}

#[test]
fn test_offline_accrual_settles_on_poll() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.cash = 1_000.0;
    let mut engine = engine_at(&clock, profile);
    engine.poll();

    engine.unlock_business(BusinessId::CoffeeCart).unwrap();
    assert_eq!(engine.profile().cash, 500.0);

    // Two idle hours at 60/hr, collected at 11:00 so no morning-rush boost.
    clock.advance(Duration::hours(2));
    let net = engine.collect_business(BusinessId::CoffeeCart).unwrap();
    assert_eq!(net, 120.0);
    assert_eq!(engine.profile().cash, 620.0);

    // Same instant again: the accrual window was reset.
    let again = engine.collect_business(BusinessId::CoffeeCart).unwrap();
    assert_eq!(again, 0.0);
}

#[test]
fn test_streak_across_days_and_rotation() {
    let clock = FixedClock::default_start();
    let mut engine = engine_at(&clock, UserProfile::default());

    engine.record_session(session(25)).unwrap();
    assert_eq!(engine.profile().current_streak, 1);
    assert_board_progress(engine.profile(), 25, 1);

    clock.advance(Duration::days(1));
    let outcome = engine.record_session(session(10)).unwrap();
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::DayRotated)));
    assert_eq!(engine.profile().current_streak, 2);

    // Rotation replaced the board; only today's session counts.
    assert_board_progress(engine.profile(), 10, 1);

    // A missed day resets, and longest is retained.
    clock.advance(Duration::days(2));
    engine.record_session(session(5)).unwrap();
    assert_eq!(engine.profile().current_streak, 1);
    assert_eq!(engine.profile().longest_streak, 2);
}

#[test]
fn test_streak_shield_absorbs_one_gap() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.current_streak = 5;
    profile.longest_streak = 5;
    profile.last_study_day = Some(clock.today());
    profile.streak_shield_armed = true;
    let mut engine = engine_at(&clock, profile);

    clock.advance(Duration::days(3));
    engine.record_session(session(5)).unwrap();
    assert_eq!(engine.profile().current_streak, 6);
    assert!(!engine.profile().streak_shield_armed);
}

#[test]
fn test_bond_lifecycle_one_choice_per_cycle() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.cash = 50_000.0;
    let mut engine = engine_at(&clock, profile);
    engine.poll();

    let bonds: Vec<_> = engine.profile().bonds.clone();
    assert_eq!(bonds.len(), 3);
    let cash_before = engine.profile().cash;

    engine.buy_bond(bonds[0].id).unwrap();
    assert_eq!(engine.profile().cash, cash_before - bonds[0].cost);

    // Second purchase in the same cycle is blocked.
    assert!(matches!(
        engine.buy_bond(bonds[1].id),
        Err(EngineError::Blocked(Blocked::BondChoiceMade))
    ));

    // After the cycle rolls the board regenerates but the holding stays.
    clock.advance(Duration::hours(1));
    let events = engine.poll();
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::BondBatchGenerated)));
    assert!(engine
        .profile()
        .bonds
        .iter()
        .any(|b| b.id == bonds[0].id && b.purchased));

    // Maturity is two hours after purchase; resolution applies exactly once.
    clock.advance(Duration::hours(1));
    let events = engine.poll();
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::BondMatured { .. })));
    assert_eq!(engine.profile().lifetime.bonds_matured, 1);
    assert!(!engine.profile().bonds.iter().any(|b| b.id == bonds[0].id));

    let settled = engine.profile().cash;
    engine.poll();
    assert_eq!(engine.profile().cash, settled);
}

#[test]
fn test_double_xp_offer_applies_to_sessions() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.daily.day_key = Some(clock.today());
    profile.daily.offers = vec![DailyOffer {
        id: "offer_1_double_xp".into(),
        effect: OfferEffect::DoubleXp,
        duration_minutes: 60,
    }];
    let mut engine = engine_at(&clock, profile);

    engine.select_offer("offer_1_double_xp").unwrap();
    let outcome = engine.record_session(session(10)).unwrap();

    // 10 min * 10 XP * (1 + 0.01 streak + 1.0 offer) = 201.
    assert!((outcome.study.xp_gained - 201.0).abs() < 1e-9);

    // A second selection while one is active is blocked.
    assert!(matches!(
        engine.select_offer("offer_1_double_xp"),
        Err(EngineError::Blocked(Blocked::OfferAlreadyActive))
    ));

    // The offer lapses on its own.
    clock.advance(Duration::hours(2));
    let events = engine.poll();
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::OfferExpired)));
}

#[test]
fn test_expired_offer_does_not_block_selection() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.daily.day_key = Some(clock.today());
    profile.daily.offers = vec![DailyOffer {
        id: "offer_1_shop_sale".into(),
        effect: OfferEffect::ShopSale,
        duration_minutes: 30,
    }];
    profile.daily.active_offer = Some(ActiveOffer {
        id: "offer_2_double_cash".into(),
        effect: OfferEffect::DoubleCash,
        end_ms: clock.now_ms() - 1,
    });
    let mut engine = engine_at(&clock, profile);

    engine.select_offer("offer_1_shop_sale").unwrap();
    assert!(engine.shop_discount() >= 0.25);
}

#[test]
fn test_challenge_claim_grants_and_is_one_shot() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.daily.day_key = Some(clock.today());
    profile.daily.challenges = vec![DailyChallenge {
        kind: ChallengeKind::FocusMinutes,
        target: 30,
        current: 0,
        reward_claimed: false,
        xp_reward: 150,
        cash_reward: 100.0,
    }];
    let mut engine = engine_at(&clock, profile);

    engine.record_session(session(30)).unwrap();

    let cash_before = engine.profile().cash;
    let (xp, cash) = engine.claim_challenge(ChallengeKind::FocusMinutes).unwrap();
    assert_eq!(xp, 150);
    assert_eq!(cash, 100.0);
    assert!(engine.profile().cash >= cash_before + cash);
    assert_eq!(engine.profile().lifetime.challenges_claimed, 1);

    assert!(matches!(
        engine.claim_challenge(ChallengeKind::FocusMinutes),
        Err(EngineError::Blocked(Blocked::RewardAlreadyClaimed))
    ));
}

#[test]
fn test_manual_daily_cap() {
    let clock = FixedClock::default_start();
    let mut engine = engine_at(&clock, UserProfile::default());

    let manual = |minutes: u32| SessionRecord {
        kind: SessionKind::Manual,
        start_ms: 0,
        duration_seconds: i64::from(minutes) * 60,
    };

    engine.record_session(manual(200)).unwrap();
    assert!(matches!(
        engine.record_session(manual(60)),
        Err(EngineError::Validation(
            ValidationError::ManualCapExceeded { .. }
        ))
    ));

    // Timer sessions are exempt, and the cap resets with the day.
    engine.record_session(session(60)).unwrap();
    clock.advance(Duration::days(1));
    engine.record_session(manual(60)).unwrap();
}

#[test]
fn test_hard_reset_cancel_window() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.xp = 5_000.0;
    profile.cash = 1_234.0;
    let mut engine = engine_at(&clock, profile);
    engine.poll();

    engine.request_hard_reset().unwrap();
    assert!(matches!(
        engine.request_hard_reset(),
        Err(EngineError::Blocked(Blocked::ResetAlreadyPending))
    ));

    clock.advance(Duration::minutes(5));
    engine.cancel_hard_reset().unwrap();

    clock.advance(Duration::minutes(6));
    engine.poll();
    assert_eq!(engine.profile().xp, 5_000.0);
    assert_eq!(engine.profile().cash, 1_234.0);
}

#[test]
fn test_hard_reset_executes_after_delay() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.xp = 5_000.0;
    let mut engine = engine_at(&clock, profile);
    engine.poll();

    engine.request_hard_reset().unwrap();
    clock.advance(Duration::minutes(11));
    let events = engine.poll();
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::HardResetExecuted)));
    assert_eq!(engine.profile().xp, 0.0);
    assert_eq!(engine.profile().level, 1);
}

#[test]
fn test_infamy_resets_economy_keeps_legend() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.xp = xp_for_level(100).unwrap() as f64;
    profile.level = 100;
    profile.cash = 99_999.0;
    profile.unlocked_skills.insert(SkillId::FocusedMind);
    profile.current_streak = 9;
    profile.longest_streak = 12;
    let mut engine = engine_at(&clock, profile);

    engine.go_infamous().unwrap();

    let profile = engine.profile();
    assert_eq!(profile.level, 1);
    assert_eq!(profile.xp, 0.0);
    assert!(profile.businesses.is_empty());
    assert_eq!(profile.infamy_level, 1);
    assert_eq!(profile.infamy_points, 1);
    assert!(profile.unlocked_skills.contains(&SkillId::FocusedMind));
    assert_eq!(profile.longest_streak, 12);
    assert!(profile
        .unlocked_achievements
        .iter()
        .any(|a| a.as_str() == "infamous"));

    // Below max level it is refused.
    assert!(matches!(
        engine.go_infamous(),
        Err(EngineError::Blocked(Blocked::InfamyRequiresMaxLevel { .. }))
    ));
}

#[test]
fn test_infamy_skill_gated_on_infamy_points() {
    let clock = FixedClock::default_start();
    let mut profile = UserProfile::default();
    profile.infamy_level = 1;
    let mut engine = engine_at(&clock, profile);

    assert!(matches!(
        engine.unlock_skill(SkillId::InfamousAura),
        Err(EngineError::Blocked(Blocked::InsufficientInfamyPoints { .. }))
    ));
}
