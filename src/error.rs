//! Engine error taxonomy
//!
//! Two user-facing families:
//!
//! - [`ValidationError`]: malformed input. Rejected before anything mutates.
//! - [`Blocked`]: a precondition is unmet (not enough cash, prerequisite
//!   missing, cooldown running). Returned as a value so callers can render
//!   why an action is unavailable before attempting it; nothing is thrown.
//!
//! Invariant drift (a stored level that disagrees with the XP table) is
//! not an error at all: it is healed by recomputation on profile load,
//! with a warning.

use thiserror::Error;

/// Bad input. State is unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("session duration must be positive")]
    NonPositiveDuration,

    #[error("manual entries are capped at {cap_minutes} minutes per day ({logged_minutes} already logged)")]
    ManualCapExceeded { cap_minutes: u32, logged_minutes: u32 },

    #[error("invalid profile document: {0}")]
    InvalidProfile(String),
}

/// A precondition is unmet. The variant names the *first* unmet condition
/// in the operation's fixed check order, so messaging is deterministic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Blocked {
    #[error("already unlocked")]
    AlreadyUnlocked,

    #[error("already owned")]
    AlreadyOwned,

    #[error("requires level {required} (currently level {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires infamy level {required} (currently {current})")]
    InfamyLevelTooLow { required: u32, current: u32 },

    #[error("missing prerequisite skill: {name}")]
    MissingPrerequisite { name: &'static str },

    #[error("not enough skill points (costs {cost}, have {available})")]
    InsufficientSkillPoints { cost: u32, available: u32 },

    #[error("not enough infamy points (costs {cost}, have {available})")]
    InsufficientInfamyPoints { cost: u32, available: u32 },

    #[error("not enough cash (costs ${cost:.2}, have ${available:.2})")]
    InsufficientCash { cost: f64, available: f64 },

    #[error("business is not unlocked")]
    BusinessLocked,

    #[error("business is already at max level")]
    BusinessMaxLevel,

    #[error("another offer is already active")]
    OfferAlreadyActive,

    #[error("no such offer today")]
    UnknownOffer,

    #[error("a bond has already been purchased this cycle")]
    BondChoiceMade,

    #[error("no such bond in the current batch")]
    UnknownBond,

    #[error("item is on cooldown for another {remaining_secs}s")]
    CooldownActive { remaining_secs: i64 },

    #[error("skin is not owned")]
    SkinNotOwned,

    #[error("challenge is not completed yet")]
    ChallengeIncomplete,

    #[error("reward was already claimed")]
    RewardAlreadyClaimed,

    #[error("no such challenge today")]
    UnknownChallenge,

    #[error("infamy requires level 100 (currently level {current})")]
    InfamyRequiresMaxLevel { current: u32 },

    #[error("no hard reset is pending")]
    NoResetPending,

    #[error("a hard reset is already pending")]
    ResetAlreadyPending,
}

/// Top-level error type for all mutating engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Blocked(#[from] Blocked),
}

impl EngineError {
    /// True when the operation failed a precondition (as opposed to
    /// malformed input).
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}
