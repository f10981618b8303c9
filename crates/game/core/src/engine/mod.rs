//! Tick-driven battle scheduler.
//!
//! [`BattleSimulation`] owns both rosters and is the only thing that mutates
//! them. Each call to [`BattleSimulation::advance`] runs the same fixed
//! pipeline to completion:
//!
//! 1. prune combatants at zero health
//! 2. advance every active effect on every living combatant, oldest first
//! 3. evaluate termination (an empty player roster is checked first)
//! 4. count action timers down and let ready combatants act
//!
//! A kill during step 4 is reported as `Finished` on the following call,
//! after the dead combatant has been pruned.

mod events;

pub use events::{BattleEvent, SkipReason};

use std::collections::HashSet;

use crate::action::TargetSelector;
use crate::config::BattleConfig;
use crate::effect::{Effect, TickReport};
use crate::error::SetupError;
use crate::rng::{PcgRng, RngSource};
use crate::state::{BattleSnapshot, Combatant, CombatantId, Team};

/// Lifecycle of a battle. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    #[default]
    Running,
    Finished {
        winner: Team,
    },
}

impl BattleOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    pub fn winner(&self) -> Option<Team> {
        match self {
            Self::Running => None,
            Self::Finished { winner } => Some(*winner),
        }
    }
}

/// Two rosters, a clock and a single seeded random source.
///
/// All randomness (action choice, target choice, random-stat modifiers) is
/// drawn from `rng`, so identical rosters and seeds replay identically.
#[derive(Clone, Debug)]
pub struct BattleSimulation<R: RngSource = PcgRng> {
    config: BattleConfig,
    players: Vec<Combatant>,
    enemies: Vec<Combatant>,
    clock: f64,
    outcome: BattleOutcome,
    rng: R,
    selector: TargetSelector,
    events: Vec<BattleEvent>,
}

impl BattleSimulation<PcgRng> {
    /// Builds a simulation driven by a [`PcgRng`] seeded with `seed`.
    pub fn new(
        config: BattleConfig,
        players: Vec<Combatant>,
        enemies: Vec<Combatant>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::with_rng(config, players, enemies, PcgRng::new(seed))
    }
}

impl<R: RngSource> BattleSimulation<R> {
    /// Builds a simulation with a caller-supplied random source.
    ///
    /// Fails if the config is invalid, a combatant sits on the wrong roster
    /// or two combatants share an id.
    pub fn with_rng(
        config: BattleConfig,
        players: Vec<Combatant>,
        enemies: Vec<Combatant>,
        rng: R,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let mut seen = HashSet::with_capacity(players.len() + enemies.len());
        for (expected, roster) in [(Team::Player, &players), (Team::Enemy, &enemies)] {
            for combatant in roster {
                if combatant.team() != expected {
                    return Err(SetupError::TeamMismatch {
                        id: combatant.id(),
                        expected,
                        found: combatant.team(),
                    });
                }
                if !seen.insert(combatant.id()) {
                    return Err(SetupError::DuplicateId(combatant.id()));
                }
            }
        }

        let selector = TargetSelector::new(config.crit_health_threshold);
        Ok(Self {
            config,
            players,
            enemies,
            clock: 0.0,
            outcome: BattleOutcome::Running,
            rng,
            selector,
            events: Vec::new(),
        })
    }

    /// Steps the battle forward by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero. Once the battle is
    /// finished further calls change nothing.
    pub fn advance(&mut self, dt: f64) -> BattleOutcome {
        if self.outcome.is_finished() {
            return self.outcome;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;

        self.prune_dead();
        self.advance_effects(dt);

        if let Some(winner) = self.decided_winner() {
            self.outcome = BattleOutcome::Finished { winner };
            self.events.push(BattleEvent::BattleFinished {
                clock: self.clock,
                winner,
            });
            return self.outcome;
        }

        self.run_actions(dt);
        self.outcome
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    /// Simulated seconds elapsed since construction.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn players(&self) -> &[Combatant] {
        &self.players
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn roster(&self, team: Team) -> &[Combatant] {
        match team {
            Team::Player => &self.players,
            Team::Enemy => &self.enemies,
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .find(|combatant| combatant.id() == id)
    }

    pub fn living(&self, team: Team) -> usize {
        self.roster(team)
            .iter()
            .filter(|combatant| combatant.is_alive())
            .count()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            clock: self.clock,
            outcome: self.outcome,
            players: self.players.iter().map(Combatant::snapshot).collect(),
            enemies: self.enemies.iter().map(Combatant::snapshot).collect(),
        }
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Strips every active effect from one combatant, reverting stat
    /// modifiers. Returns the number of effects removed, or `None` if no
    /// combatant has that id.
    pub fn force_remove_effects(&mut self, id: CombatantId) -> Option<usize> {
        let clock = self.clock;
        let combatant = self
            .players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|combatant| combatant.id() == id)?;

        let removed = combatant.force_remove_effects();
        for (effect, reverted) in &removed {
            if let Some(stat) = *reverted {
                self.events.push(BattleEvent::ModifierReverted {
                    clock,
                    source: effect.source(),
                    target: id,
                    kind: effect.kind(),
                    stat,
                });
            }
        }
        Some(removed.len())
    }

    /// Takes a combatant out of the battle, reverting its stat modifiers
    /// first. Effects it applied to others stay in place.
    pub fn remove_combatant(&mut self, id: CombatantId) -> Option<Combatant> {
        self.force_remove_effects(id)?;
        for roster in [&mut self.players, &mut self.enemies] {
            if let Some(position) = roster.iter().position(|combatant| combatant.id() == id) {
                return Some(roster.remove(position));
            }
        }
        None
    }

    // ========================================================================
    // Pipeline steps
    // ========================================================================

    fn prune_dead(&mut self) {
        self.players.retain(Combatant::is_alive);
        self.enemies.retain(Combatant::is_alive);
    }

    fn advance_effects(&mut self, dt: f64) {
        let clock = self.clock;
        let events = &mut self.events;
        for combatant in self.players.iter_mut().chain(self.enemies.iter_mut()) {
            if !combatant.is_alive() {
                continue;
            }
            let target = combatant.id();
            let team = combatant.team();
            combatant.advance_effects(dt, |effect, report| {
                record_tick(events, clock, target, team, effect, report);
            });
        }
    }

    fn decided_winner(&self) -> Option<Team> {
        if self.living(Team::Player) == 0 {
            Some(Team::Enemy)
        } else if self.living(Team::Enemy) == 0 {
            Some(Team::Player)
        } else {
            None
        }
    }

    fn run_actions(&mut self, dt: f64) {
        for team in [Team::Player, Team::Enemy] {
            for index in 0..self.roster(team).len() {
                let ready = {
                    let actor = match team {
                        Team::Player => &mut self.players[index],
                        Team::Enemy => &mut self.enemies[index],
                    };
                    actor.is_alive() && actor.tick_countdown(dt)
                };
                if !ready {
                    continue;
                }

                self.take_action(team, index);

                let actor = match team {
                    Team::Player => &mut self.players[index],
                    Team::Enemy => &mut self.enemies[index],
                };
                actor.reset_countdown(&self.config);
            }
        }
    }

    /// One bounded attempt: draw an action, pick a target, resolve it.
    /// A missing target skips the action for this step.
    fn take_action(&mut self, team: Team, index: usize) {
        let clock = self.clock;
        let (allies, opponents) = match team {
            Team::Player => (&self.players, &self.enemies),
            Team::Enemy => (&self.enemies, &self.players),
        };
        let actor = &allies[index];
        let actor_id = actor.id();

        let catalog = actor.catalog();
        if catalog.is_empty() {
            self.events.push(BattleEvent::ActionSkipped {
                clock,
                actor: actor_id,
                kind: None,
                reason: SkipReason::EmptyRepertoire,
            });
            return;
        }
        let choice = self.rng.range_usize(catalog.len());
        let Some(template) = catalog.get(choice) else {
            return;
        };
        let kind = template.kind();

        let Some(target_id) = self
            .selector
            .select(actor, kind, allies, opponents, &mut self.rng)
        else {
            self.events.push(BattleEvent::ActionSkipped {
                clock,
                actor: actor_id,
                kind: Some(kind),
                reason: SkipReason::NoTarget,
            });
            return;
        };

        let source = actor.as_source();
        let mut effect = template.instantiate(actor_id);

        let Some(target) = self
            .players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|combatant| combatant.id() == target_id)
        else {
            return;
        };
        let target_team = target.team();
        let report = effect.on_apply(&source, target.stats_mut(), &mut self.rng);
        if effect.is_persistent() {
            target.register(effect);
        }

        self.events.push(BattleEvent::ActionResolved {
            clock,
            actor: actor_id,
            target: target_id,
            kind,
            amount: report.amount,
            critical: report.critical,
        });
        if let Some(stat) = report.stat {
            self.events.push(BattleEvent::ModifierApplied {
                clock,
                source: actor_id,
                target: target_id,
                kind,
                stat,
            });
        }
        if report.killed {
            self.events.push(BattleEvent::CombatantDied {
                clock,
                id: target_id,
                team: target_team,
                killer: Some(actor_id),
            });
        }
    }
}

fn record_tick(
    events: &mut Vec<BattleEvent>,
    clock: f64,
    target: CombatantId,
    team: Team,
    effect: &Effect,
    report: TickReport,
) {
    let source = effect.source();
    let kind = effect.kind();
    if report.ticks > 0 {
        events.push(BattleEvent::PeriodicTick {
            clock,
            source,
            target,
            kind,
            ticks: report.ticks,
            amount: report.amount,
        });
    }
    if let Some(stat) = report.reverted {
        events.push(BattleEvent::ModifierReverted {
            clock,
            source,
            target,
            kind,
            stat,
        });
    }
    if report.expired {
        events.push(BattleEvent::EffectExpired {
            clock,
            source,
            target,
            kind,
        });
    }
    if report.killed {
        events.push(BattleEvent::CombatantDied {
            clock,
            id: target,
            team,
            killer: Some(source),
        });
    }
}
