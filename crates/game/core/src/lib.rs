//! Deterministic team-vs-team battle rules.
//!
//! `battle-core` holds the canonical simulation: combatant stats, the six
//! effect kinds, per-combatant action catalogs, target selection and the
//! tick-driven [`engine::BattleSimulation`]. It performs no I/O and does not
//! log; hosts drive it through `advance(dt)` and read snapshots and drained
//! [`engine::BattleEvent`]s back out.
pub mod action;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;
pub mod stats;

pub use action::{ActionCatalog, ActionSpec, ActionTemplate, TargetSelector};
pub use config::BattleConfig;
pub use effect::{
    ApplyReport, Effect, EffectKind, EffectSource, Periodic, StatModifier, Strike, TickReport,
};
pub use engine::{BattleEvent, BattleOutcome, BattleSimulation, SkipReason};
pub use error::{BattleError, ConfigError, SetupError};
pub use rng::{PcgRng, RngSource};
pub use state::{BattleSnapshot, Combatant, CombatantId, CombatantSnapshot, EffectSnapshot, Team};
pub use stats::{DamageOutcome, StatBlock, StatKind};
