//! A single battle participant.

use crate::action::{ActionCatalog, ActionSpec};
use crate::config::BattleConfig;
use crate::effect::{Effect, EffectSource, TickReport, TIME_EPSILON};
use crate::error::SetupError;
use crate::stats::{StatBlock, StatKind};

use super::snapshot::{CombatantSnapshot, EffectSnapshot};
use super::{CombatantId, Team};

/// One combatant: identity, stats, repertoire, active effects, countdown.
///
/// The combatant is the single owner of its timers. There is no side table
/// keyed by combatant anywhere in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    team: Team,
    stats: StatBlock,
    catalog: ActionCatalog,
    /// Effects applied *to* this combatant, in application order.
    effects: Vec<Effect>,
    action_countdown: f64,
}

impl Combatant {
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        team: Team,
        stats: StatBlock,
        catalog: ActionCatalog,
        initial_countdown: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            stats,
            catalog,
            effects: Vec::new(),
            action_countdown: initial_countdown,
        }
    }

    /// Builds the repertoire from `actions` using this combatant's own stats
    /// and starts the countdown at the configured start cooldown.
    pub fn spawn(
        id: CombatantId,
        name: impl Into<String>,
        team: Team,
        stats: StatBlock,
        actions: &[ActionSpec],
        config: &BattleConfig,
    ) -> Result<Self, SetupError> {
        let catalog = ActionCatalog::build(actions, config, &stats)?;
        Ok(Self::new(id, name, team, stats, catalog, config.start_cooldown))
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Seconds until this combatant acts.
    pub fn action_countdown(&self) -> f64 {
        self.action_countdown
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Copy of the attacker-side values an effect needs.
    pub fn as_source(&self) -> EffectSource {
        EffectSource {
            id: self.id,
            attack: self.stats.attack(),
            health_fraction: self.stats.health_fraction(),
        }
    }

    pub(crate) fn register(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Counts the action timer down; true when the combatant should act.
    pub(crate) fn tick_countdown(&mut self, dt: f64) -> bool {
        self.action_countdown -= dt;
        self.action_countdown <= TIME_EPSILON
    }

    /// Restarts the action timer from the current (possibly buffed) speed.
    pub(crate) fn reset_countdown(&mut self, config: &BattleConfig) {
        self.action_countdown = config.action_interval(self.stats.speed());
    }

    /// Advances every active effect by `dt`, oldest first, then drops the
    /// expired ones. `observe` sees each effect with its tick report.
    pub(crate) fn advance_effects<F>(&mut self, dt: f64, mut observe: F)
    where
        F: FnMut(&Effect, TickReport),
    {
        for effect in self.effects.iter_mut() {
            let report = effect.on_tick(&mut self.stats, dt);
            observe(effect, report);
        }
        self.effects.retain(|effect| !effect.is_expired());
    }

    /// Strips every active effect, reverting stat modifiers.
    ///
    /// Returns the removed effects together with any stat restored.
    pub fn force_remove_effects(&mut self) -> Vec<(Effect, Option<StatKind>)> {
        let mut removed = Vec::with_capacity(self.effects.len());
        for mut effect in self.effects.drain(..) {
            let reverted = effect.on_force_remove(&mut self.stats);
            removed.push((effect, reverted));
        }
        removed
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            id: self.id,
            name: self.name.clone(),
            team: self.team,
            current_health: self.stats.current_health(),
            max_health: self.stats.max_health(),
            attack: self.stats.attack(),
            defense: self.stats.defense(),
            speed: self.stats.speed(),
            active_effects: self
                .effects
                .iter()
                .map(|effect| EffectSnapshot {
                    kind: effect.kind(),
                    source: effect.source(),
                    remaining: effect.remaining(),
                    is_debuff: effect.is_debuff(),
                    stat: effect.modified_stat(),
                })
                .collect(),
            action_countdown: self.action_countdown,
        }
    }
}
