//! Read-only views handed to hosts and UI layers.

use crate::effect::EffectKind;
use crate::engine::BattleOutcome;
use crate::stats::StatKind;

use super::{CombatantId, Team};

/// One active effect as seen from outside the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSnapshot {
    pub kind: EffectKind,
    pub source: CombatantId,
    /// Seconds until the effect expires.
    pub remaining: f64,
    pub is_debuff: bool,
    /// Stat scaled by a buff or debuff, once it has been chosen.
    pub stat: Option<StatKind>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub current_health: f64,
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub active_effects: Vec<EffectSnapshot>,
    /// Seconds until the combatant acts again.
    pub action_countdown: f64,
}

impl CombatantSnapshot {
    pub fn health_fraction(&self) -> f64 {
        if self.max_health > 0.0 {
            self.current_health / self.max_health
        } else {
            0.0
        }
    }
}

/// Whole-battle view at a point in simulated time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub clock: f64,
    pub outcome: BattleOutcome,
    pub players: Vec<CombatantSnapshot>,
    pub enemies: Vec<CombatantSnapshot>,
}

impl BattleSnapshot {
    pub fn roster(&self, team: Team) -> &[CombatantSnapshot] {
        match team {
            Team::Player => &self.players,
            Team::Enemy => &self.enemies,
        }
    }

    /// Members of `team` still above zero health.
    pub fn living(&self, team: Team) -> usize {
        self.roster(team)
            .iter()
            .filter(|combatant| combatant.current_health > 0.0)
            .count()
    }
}
