//! Grindstone - focus-time progression engine
//!
//! Grindstone turns focused work minutes into a single-player progression
//! loop: XP and levels, daily streaks, a skill tree, idle businesses that
//! accrue income while the app is closed, risk-tiered bonds, rotating daily
//! challenges and offers, achievements, and prestige resets.
//!
//! The core design rule is that nothing ticks. All time-driven behavior -
//! business accrual, bond cycles, streaks, daily rotation - is derived from
//! stored timestamps plus one clock read, so the engine produces the same
//! state whether it was polled every second or opened once a week.
//!
//! [`engine::Engine`] is the main entry point; it owns a
//! [`profile::UserProfile`] and exposes every player operation.

pub mod achievements;
pub mod clock;
pub mod daily;
pub mod economy;
pub mod engine;
pub mod error;
pub mod profile;
pub mod progression;
pub mod reset;
pub mod session;
pub mod settings;
pub mod skills;

pub use engine::{Engine, EngineEvent, SessionOutcome};
pub use error::{Blocked, EngineError, ValidationError};
pub use profile::{ProfileStore, UserProfile};
