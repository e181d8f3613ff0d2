//! Shop: timer skins and consumable utility items
//!
//! Purchases are guarded balance transfers gated on level and cash. Skins
//! are permanent and equippable; utility items are consumables with a
//! per-item cooldown tracked as an absolute end timestamp, so cooldowns
//! survive restarts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Blocked;
use crate::profile::UserProfile;

/// Unique identifier for each timer skin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SkinId {
    Midnight,
    Sakura,
    Synthwave,
    Gilded,
    Holographic,
}

impl SkinId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Midnight => "midnight",
            Self::Sakura => "sakura",
            Self::Synthwave => "synthwave",
            Self::Gilded => "gilded",
            Self::Holographic => "holographic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        SKINS.iter().map(|sk| sk.id).find(|id| id.as_str() == s)
    }
}

#[derive(Debug, Clone)]
pub struct SkinSpec {
    pub id: SkinId,
    pub name: &'static str,
    pub cost: f64,
    pub required_level: u32,
}

pub static SKINS: &[SkinSpec] = &[
    SkinSpec {
        id: SkinId::Midnight,
        name: "Midnight",
        cost: 1_000.0,
        required_level: 5,
    },
    SkinSpec {
        id: SkinId::Sakura,
        name: "Sakura",
        cost: 2_500.0,
        required_level: 10,
    },
    SkinSpec {
        id: SkinId::Synthwave,
        name: "Synthwave",
        cost: 6_000.0,
        required_level: 20,
    },
    SkinSpec {
        id: SkinId::Gilded,
        name: "Gilded",
        cost: 20_000.0,
        required_level: 40,
    },
    SkinSpec {
        id: SkinId::Holographic,
        name: "Holographic",
        cost: 75_000.0,
        required_level: 60,
    },
];

impl SkinSpec {
    pub fn get(id: SkinId) -> &'static SkinSpec {
        SKINS
            .iter()
            .find(|s| s.id == id)
            .expect("all skin ids are defined in the catalog")
    }
}

/// Unique identifier for each utility item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UtilityId {
    EspressoShot,
    CourierRun,
    StreakShield,
}

impl UtilityId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EspressoShot => "espresso_shot",
            Self::CourierRun => "courier_run",
            Self::StreakShield => "streak_shield",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        UTILITIES.iter().map(|u| u.id).find(|id| id.as_str() == s)
    }
}

/// What a utility does when consumed. The engine applies the effect; the
/// shop only handles the transfer and cooldown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UtilityEffect {
    /// Immediate flat XP grant.
    BonusXp(u64),
    /// Collect every unlocked business right now.
    CollectAll,
    /// Protect the current streak from its next reset.
    StreakShield,
}

#[derive(Debug, Clone)]
pub struct UtilitySpec {
    pub id: UtilityId,
    pub name: &'static str,
    pub cost: f64,
    pub required_level: u32,
    pub cooldown_ms: i64,
    pub effect: UtilityEffect,
}

pub static UTILITIES: &[UtilitySpec] = &[
    UtilitySpec {
        id: UtilityId::EspressoShot,
        name: "Espresso Shot",
        cost: 300.0,
        required_level: 3,
        cooldown_ms: 4 * 3_600_000,
        effect: UtilityEffect::BonusXp(100),
    },
    UtilitySpec {
        id: UtilityId::CourierRun,
        name: "Courier Run",
        cost: 800.0,
        required_level: 6,
        cooldown_ms: 8 * 3_600_000,
        effect: UtilityEffect::CollectAll,
    },
    UtilitySpec {
        id: UtilityId::StreakShield,
        name: "Streak Shield",
        cost: 1_500.0,
        required_level: 8,
        cooldown_ms: 48 * 3_600_000,
        effect: UtilityEffect::StreakShield,
    },
];

impl UtilitySpec {
    pub fn get(id: UtilityId) -> &'static UtilitySpec {
        UTILITIES
            .iter()
            .find(|u| u.id == id)
            .expect("all utility ids are defined in the catalog")
    }
}

/// Purchase a skin. `discount` is the combined fractional discount (skills
/// plus any active offer), clamped to [0, 0.9].
pub fn buy_skin(profile: &mut UserProfile, id: SkinId, discount: f64) -> Result<(), Blocked> {
    let spec = SkinSpec::get(id);

    if profile.owned_skins.contains(&id) {
        return Err(Blocked::AlreadyOwned);
    }
    if profile.level < spec.required_level {
        return Err(Blocked::LevelTooLow {
            required: spec.required_level,
            current: profile.level,
        });
    }
    let price = discounted_price(spec.cost, discount);
    if profile.cash < price {
        return Err(Blocked::InsufficientCash {
            cost: price,
            available: profile.cash,
        });
    }

    profile.cash -= price;
    profile.owned_skins.insert(id);
    debug!(skin = spec.name, price, "skin purchased");
    Ok(())
}

/// Equip an owned skin (or `None` for the default look).
pub fn equip_skin(profile: &mut UserProfile, id: Option<SkinId>) -> Result<(), Blocked> {
    if let Some(id) = id {
        if !profile.owned_skins.contains(&id) {
            return Err(Blocked::SkinNotOwned);
        }
    }
    profile.equipped_skin = id;
    Ok(())
}

/// Purchase (consume) a utility item. Blocked while its cooldown runs;
/// on success the cooldown restarts and the effect is returned for the
/// caller to apply.
pub fn buy_utility(
    profile: &mut UserProfile,
    id: UtilityId,
    now_ms: i64,
    discount: f64,
) -> Result<UtilityEffect, Blocked> {
    let spec = UtilitySpec::get(id);

    if profile.level < spec.required_level {
        return Err(Blocked::LevelTooLow {
            required: spec.required_level,
            current: profile.level,
        });
    }
    if let Some(end_ms) = profile.utility_cooldowns.get(&id) {
        if *end_ms > now_ms {
            return Err(Blocked::CooldownActive {
                remaining_secs: (end_ms - now_ms) / 1000,
            });
        }
    }
    let price = discounted_price(spec.cost, discount);
    if profile.cash < price {
        return Err(Blocked::InsufficientCash {
            cost: price,
            available: profile.cash,
        });
    }

    profile.cash -= price;
    profile.owned_utilities.insert(id);
    profile
        .utility_cooldowns
        .insert(id, now_ms + spec.cooldown_ms);
    debug!(item = spec.name, price, "utility purchased");
    Ok(spec.effect)
}

fn discounted_price(cost: f64, discount: f64) -> f64 {
    cost * (1.0 - discount.clamp(0.0, 0.9))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> UserProfile {
        let mut profile = UserProfile::default();
        profile.level = 10;
        profile.cash = 10_000.0;
        profile
    }

    #[test]
    fn test_buy_and_equip_skin() {
        let mut profile = buyer();
        buy_skin(&mut profile, SkinId::Midnight, 0.0).unwrap();
        assert!((profile.cash - 9_000.0).abs() < 1e-9);
        equip_skin(&mut profile, Some(SkinId::Midnight)).unwrap();
        assert_eq!(profile.equipped_skin, Some(SkinId::Midnight));
    }

    #[test]
    fn test_skin_level_gate() {
        let mut profile = buyer();
        assert!(matches!(
            buy_skin(&mut profile, SkinId::Synthwave, 0.0),
            Err(Blocked::LevelTooLow { required: 20, .. })
        ));
    }

    #[test]
    fn test_skin_owned_once() {
        let mut profile = buyer();
        buy_skin(&mut profile, SkinId::Midnight, 0.0).unwrap();
        assert_eq!(
            buy_skin(&mut profile, SkinId::Midnight, 0.0),
            Err(Blocked::AlreadyOwned)
        );
    }

    #[test]
    fn test_equip_unowned_skin_blocked() {
        let mut profile = buyer();
        assert_eq!(
            equip_skin(&mut profile, Some(SkinId::Sakura)),
            Err(Blocked::SkinNotOwned)
        );
    }

    #[test]
    fn test_discount_applies() {
        let mut profile = buyer();
        buy_skin(&mut profile, SkinId::Midnight, 0.10).unwrap();
        assert!((profile.cash - 9_100.0).abs() < 1e-9);
    }

    #[test]
    fn test_utility_cooldown_blocks_repurchase() {
        let mut profile = buyer();
        let now = 1_000_000;
        let effect = buy_utility(&mut profile, UtilityId::EspressoShot, now, 0.0).unwrap();
        assert_eq!(effect, UtilityEffect::BonusXp(100));

        assert!(matches!(
            buy_utility(&mut profile, UtilityId::EspressoShot, now + 1, 0.0),
            Err(Blocked::CooldownActive { .. })
        ));

        let spec = UtilitySpec::get(UtilityId::EspressoShot);
        assert!(buy_utility(
            &mut profile,
            UtilityId::EspressoShot,
            now + spec.cooldown_ms,
            0.0
        )
        .is_ok());
    }
}
