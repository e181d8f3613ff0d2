//! Time-boxed investment bonds
//!
//! A batch of three bonds is generated once per rolling hour, keyed off
//! `last_bond_generation_ms`. At most one bond per batch may be purchased.
//! The outcome is rolled once, at purchase time, and stored on the bond, so
//! claiming matured bonds is idempotent no matter how often the poll runs.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Blocked;
use crate::profile::UserProfile;

/// One generation cycle: a rolling hour.
pub const BOND_CYCLE_MS: i64 = 3_600_000;

/// Fixed maturity window after purchase.
pub const BOND_MATURITY_MS: i64 = 2 * 3_600_000;

/// Bonds offered per generation cycle.
pub const BONDS_PER_BATCH: usize = 3;

/// Risk tier; spreads widen with risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Probability the bond pays out rather than defaulting.
    fn success_chance(&self) -> f64 {
        match self {
            Self::Low => 0.90,
            Self::Medium => 0.65,
            Self::High => 0.45,
        }
    }

    /// Principal range for the tier.
    fn cost_range(&self) -> (f64, f64) {
        match self {
            Self::Low => (100.0, 500.0),
            Self::Medium => (500.0, 2_000.0),
            Self::High => (2_000.0, 8_000.0),
        }
    }

    /// Payout multiplier range over the principal.
    fn return_factor_range(&self) -> (f64, f64) {
        match self {
            Self::Low => (1.08, 1.15),
            Self::Medium => (1.25, 1.60),
            Self::High => (1.80, 3.00),
        }
    }

    /// Extra penalty on default, as a fraction of the principal. High-risk
    /// defaults can cost up to the principal again.
    fn loss_factor_range(&self) -> (f64, f64) {
        match self {
            Self::Low => (0.0, 0.0),
            Self::Medium => (0.10, 0.25),
            Self::High => (0.50, 1.00),
        }
    }
}

/// A single bond instance. Pre-purchase it advertises its terms; after
/// purchase it carries the (already decided) resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    pub id: Uuid,
    pub risk: RiskTier,
    pub cost: f64,
    /// Credited on success at maturity (includes the principal).
    pub potential_return: f64,
    /// Additionally debited on default at maturity.
    pub potential_loss: f64,
    /// Generation timestamp of the batch this bond belongs to.
    pub cycle_ms: i64,
    #[serde(default)]
    pub purchased: bool,
    /// Set at purchase: `purchase time + BOND_MATURITY_MS`.
    #[serde(default)]
    pub maturity_ms: Option<i64>,
    /// Signed cash delta decided at purchase, applied once at maturity.
    #[serde(default)]
    pub outcome: Option<f64>,
}

/// Result of one matured bond being resolved.
#[derive(Debug, Clone)]
pub struct BondResolution {
    pub id: Uuid,
    pub risk: RiskTier,
    /// Signed net delta applied to cash (before the zero floor).
    pub delta: f64,
}

/// True when a new batch is due.
pub fn generation_due(profile: &UserProfile, now_ms: i64) -> bool {
    now_ms - profile.last_bond_generation_ms >= BOND_CYCLE_MS
}

/// Replace the unsold batch with a freshly generated one. Purchased bonds
/// awaiting maturity are kept.
pub fn generate_batch<R: Rng>(profile: &mut UserProfile, now_ms: i64, rng: &mut R) {
    profile.bonds.retain(|b| b.purchased);

    for _ in 0..BONDS_PER_BATCH {
        let risk = match rng.gen_range(0..3) {
            0 => RiskTier::Low,
            1 => RiskTier::Medium,
            _ => RiskTier::High,
        };
        let (cost_lo, cost_hi) = risk.cost_range();
        // Whole-dollar principals read better in the bond list.
        let cost = rng.gen_range(cost_lo..=cost_hi).round();
        let (ret_lo, ret_hi) = risk.return_factor_range();
        let potential_return = (cost * rng.gen_range(ret_lo..=ret_hi)).round();
        let (loss_lo, loss_hi) = risk.loss_factor_range();
        let potential_loss = (cost * rng.gen_range(loss_lo..=loss_hi)).round();

        profile.bonds.push(Bond {
            id: Uuid::new_v4(),
            risk,
            cost,
            potential_return,
            potential_loss,
            cycle_ms: now_ms,
            purchased: false,
            maturity_ms: None,
            outcome: None,
        });
    }

    profile.last_bond_generation_ms = now_ms;
    debug!("generated new bond batch");
}

/// True when a bond from the current batch has already been purchased.
pub fn choice_made_this_cycle(profile: &UserProfile) -> bool {
    profile
        .bonds
        .iter()
        .any(|b| b.purchased && b.cycle_ms == profile.last_bond_generation_ms)
}

/// Purchase a bond from the current batch. One purchase per cycle; the
/// outcome is rolled here and stored, never re-rolled.
pub fn buy<R: Rng>(
    profile: &mut UserProfile,
    id: Uuid,
    now_ms: i64,
    rng: &mut R,
) -> Result<(), Blocked> {
    if choice_made_this_cycle(profile) {
        return Err(Blocked::BondChoiceMade);
    }

    let current_cycle = profile.last_bond_generation_ms;
    let Some(idx) = profile
        .bonds
        .iter()
        .position(|b| b.id == id && !b.purchased && b.cycle_ms == current_cycle)
    else {
        return Err(Blocked::UnknownBond);
    };

    let cost = profile.bonds[idx].cost;
    if profile.cash < cost {
        return Err(Blocked::InsufficientCash {
            cost,
            available: profile.cash,
        });
    }

    let succeeded = rng.gen_bool(profile.bonds[idx].risk.success_chance());
    let bond = &mut profile.bonds[idx];
    bond.purchased = true;
    bond.maturity_ms = Some(now_ms + BOND_MATURITY_MS);
    bond.outcome = Some(if succeeded {
        bond.potential_return
    } else {
        -bond.potential_loss
    });

    profile.cash -= cost;
    info!(risk = bond.risk.as_str(), cost, "bond purchased");
    Ok(())
}

/// Resolve every purchased bond whose maturity has passed. Safe to call on
/// every poll: resolved bonds are removed, and the stored outcome is applied
/// exactly once. Cash never goes below zero.
pub fn claim_matured(profile: &mut UserProfile, now_ms: i64) -> Vec<BondResolution> {
    let mut resolutions = Vec::new();

    let mut remaining = Vec::with_capacity(profile.bonds.len());
    for bond in profile.bonds.drain(..) {
        let matured = bond.purchased && bond.maturity_ms.is_some_and(|m| m <= now_ms);
        if !matured {
            remaining.push(bond);
            continue;
        }

        let delta = bond.outcome.unwrap_or(0.0);
        profile.cash = (profile.cash + delta).max(0.0);
        if delta > 0.0 {
            profile.lifetime.cash_earned += delta;
        }
        profile.lifetime.bonds_matured += 1;
        info!(risk = bond.risk.as_str(), delta, "bond matured");
        resolutions.push(BondResolution {
            id: bond.id,
            risk: bond.risk,
            delta,
        });
    }
    profile.bonds = remaining;

    resolutions
}
