//! Structured record of everything that happened during `advance`.
//!
//! Events are buffered inside the simulation and handed out through
//! [`BattleSimulation::drain_events`](super::BattleSimulation::drain_events).
//! Every event carries the simulation clock at which it happened and the ids
//! needed to attribute it.

use crate::effect::EffectKind;
use crate::state::{CombatantId, Team};
use crate::stats::StatKind;

/// Why a ready combatant did nothing this step.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkipReason {
    /// The drawn action had no valid target.
    NoTarget,
    /// The combatant has no actions at all.
    EmptyRepertoire,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// An action landed on its target.
    ActionResolved {
        clock: f64,
        actor: CombatantId,
        target: CombatantId,
        kind: EffectKind,
        /// Health removed or restored on landing (0 for persistent kinds).
        amount: f64,
        critical: bool,
    },
    ActionSkipped {
        clock: f64,
        actor: CombatantId,
        kind: Option<EffectKind>,
        reason: SkipReason,
    },
    ModifierApplied {
        clock: f64,
        source: CombatantId,
        target: CombatantId,
        kind: EffectKind,
        stat: StatKind,
    },
    /// One or more periodic ticks fired during a single step.
    PeriodicTick {
        clock: f64,
        source: CombatantId,
        target: CombatantId,
        kind: EffectKind,
        ticks: u32,
        amount: f64,
    },
    ModifierReverted {
        clock: f64,
        source: CombatantId,
        target: CombatantId,
        kind: EffectKind,
        stat: StatKind,
    },
    EffectExpired {
        clock: f64,
        source: CombatantId,
        target: CombatantId,
        kind: EffectKind,
    },
    CombatantDied {
        clock: f64,
        id: CombatantId,
        team: Team,
        /// Whoever dealt the killing blow, if anyone did.
        killer: Option<CombatantId>,
    },
    BattleFinished {
        clock: f64,
        winner: Team,
    },
}

impl BattleEvent {
    pub fn clock(&self) -> f64 {
        match self {
            Self::ActionResolved { clock, .. }
            | Self::ActionSkipped { clock, .. }
            | Self::ModifierApplied { clock, .. }
            | Self::PeriodicTick { clock, .. }
            | Self::ModifierReverted { clock, .. }
            | Self::EffectExpired { clock, .. }
            | Self::CombatantDied { clock, .. }
            | Self::BattleFinished { clock, .. } => *clock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionResolved { .. } => "action_resolved",
            Self::ActionSkipped { .. } => "action_skipped",
            Self::ModifierApplied { .. } => "modifier_applied",
            Self::PeriodicTick { .. } => "periodic_tick",
            Self::ModifierReverted { .. } => "modifier_reverted",
            Self::EffectExpired { .. } => "effect_expired",
            Self::CombatantDied { .. } => "combatant_died",
            Self::BattleFinished { .. } => "battle_finished",
        }
    }
}
