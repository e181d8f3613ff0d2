//! Daily offers
//!
//! A few time-boxed boosts are offered each day. Selecting one makes it the
//! single active offer until its window elapses; the choice cannot be
//! changed before then, and rotation to a new day clears it.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Effect of an offer while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferEffect {
    /// Study XP is doubled.
    DoubleXp,
    /// Study cash is doubled.
    DoubleCash,
    /// 25% off everything in the shop.
    ShopSale,
}

impl OfferEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleXp => "double_xp",
            Self::DoubleCash => "double_cash",
            Self::ShopSale => "shop_sale",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DoubleXp => "Double XP",
            Self::DoubleCash => "Double Cash",
            Self::ShopSale => "Shop Sale (25% off)",
        }
    }
}

struct OfferTemplate {
    effect: OfferEffect,
    duration_minutes: &'static [u32],
}

static TEMPLATES: &[OfferTemplate] = &[
    OfferTemplate {
        effect: OfferEffect::DoubleXp,
        duration_minutes: &[30, 60],
    },
    OfferTemplate {
        effect: OfferEffect::DoubleCash,
        duration_minutes: &[30, 60],
    },
    OfferTemplate {
        effect: OfferEffect::ShopSale,
        duration_minutes: &[90, 120],
    },
];

/// Offers presented per day.
pub const OFFERS_PER_DAY: usize = 3;

/// One offer on today's board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOffer {
    /// Stable within the day; used to select the offer.
    pub id: String,
    pub effect: OfferEffect,
    pub duration_minutes: u32,
}

/// The offer currently in effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveOffer {
    pub id: String,
    pub effect: OfferEffect,
    /// Unix millis when the offer lapses.
    pub end_ms: i64,
}

impl ActiveOffer {
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.end_ms > now_ms
    }
}

/// Sample today's offer board: distinct effects, random durations.
pub fn sample_offers<R: Rng>(rng: &mut R) -> Vec<DailyOffer> {
    let mut picked: Vec<&OfferTemplate> = TEMPLATES.iter().collect();
    picked.shuffle(rng);
    picked
        .into_iter()
        .take(OFFERS_PER_DAY)
        .enumerate()
        .map(|(i, template)| {
            let duration = *template
                .duration_minutes
                .choose(rng)
                .expect("templates always list at least one duration");
            DailyOffer {
                id: format!("offer_{}_{}", i + 1, template.effect.as_str()),
                effect: template.effect,
                duration_minutes: duration,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_offers_distinct_effects() {
        let mut rng = StdRng::seed_from_u64(5);
        let offers = sample_offers(&mut rng);
        assert_eq!(offers.len(), OFFERS_PER_DAY);
        let mut effects: Vec<_> = offers.iter().map(|o| o.effect.as_str()).collect();
        effects.sort();
        effects.dedup();
        assert_eq!(effects.len(), OFFERS_PER_DAY);
    }

    #[test]
    fn test_active_offer_window() {
        let offer = ActiveOffer {
            id: "offer_1_double_xp".into(),
            effect: OfferEffect::DoubleXp,
            end_ms: 1_000,
        };
        assert!(offer.is_active(999));
        assert!(!offer.is_active(1_000));
    }
}
