//! Error types for battle-core.
//!
//! The simulation itself never fails once running: missing targets and stale
//! references are ordinary no-ops. Everything here is raised while a battle is
//! being *built*, so hosts can reject bad data before the first tick.
//!
//! # Design Principles
//!
//! - **Reject, never clamp**: invalid values are reported with the field name
//! - **Setup only**: `advance` has no error path
//! - **Stable codes**: every variant maps to a static code for tests and logs

use crate::state::{CombatantId, Team};

/// Common trait for all battle-core errors.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Invalid tunable or effect parameter.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error(
        "{effect} timing is invalid: duration {duration}, interval {interval} \
         (both must be positive and the interval must fit inside the duration)"
    )]
    InvalidTiming {
        effect: &'static str,
        duration: f64,
        interval: f64,
    },

    #[error("stat multiplier must be positive and finite, got {multiplier}")]
    InvalidMultiplier { multiplier: f64 },
}

impl BattleError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
            Self::InvalidTiming { .. } => "CONFIG_INVALID_TIMING",
            Self::InvalidMultiplier { .. } => "CONFIG_INVALID_MULTIPLIER",
        }
    }
}

/// Failure while assembling combatants or a simulation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("combatant id {0} appears more than once")]
    DuplicateId(CombatantId),

    #[error("combatant {id} is tagged {found} but was placed in the {expected} roster")]
    TeamMismatch {
        id: CombatantId,
        expected: Team,
        found: Team,
    },
}

impl BattleError for SetupError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(inner) => inner.error_code(),
            Self::DuplicateId(_) => "SETUP_DUPLICATE_ID",
            Self::TeamMismatch { .. } => "SETUP_TEAM_MISMATCH",
        }
    }
}
