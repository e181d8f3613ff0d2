//! Idle economy: businesses, bonds, and the shop
//!
//! Everything here is timestamp-driven. Accrual, maturity, and cooldowns
//! derive from stored Unix-millisecond timestamps plus one clock read, so
//! the math is identical whether the process polled every second or was
//! closed for a week.

pub mod bonds;
pub mod business;
pub mod shop;

pub use bonds::{Bond, BondResolution, RiskTier, BOND_CYCLE_MS, BOND_MATURITY_MS};
pub use business::{BusinessId, BusinessSpec, BusinessState, Gimmick, BUSINESSES};
pub use shop::{SkinId, SkinSpec, UtilityEffect, UtilityId, UtilitySpec, SKINS, UTILITIES};
