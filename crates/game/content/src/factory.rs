//! Randomized team spawning.

use battle_core::{
    ActionSpec, BattleConfig, Combatant, CombatantId, ConfigError, RngSource, SetupError,
    StatBlock, Team,
};

use crate::roster::Roster;

/// Spawns `Player_i` / `Enemy_i` combatants with stats scattered around the
/// configured base values.
///
/// Each stat is drawn as `base × (1 + variance × u)` with `u` uniform in
/// `[-1, 1)`. Draws happen in a fixed order (health, attack, defense, speed,
/// players before enemies), so one seed always produces the same roster.
#[derive(Clone, Debug)]
pub struct RosterFactory {
    config: BattleConfig,
    actions: Vec<ActionSpec>,
}

impl RosterFactory {
    /// Factory giving every combatant one action of each kind.
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            actions: ActionSpec::STANDARD.to_vec(),
        }
    }

    /// Overrides the repertoire handed to every spawned combatant.
    pub fn with_actions(mut self, actions: impl Into<Vec<ActionSpec>>) -> Self {
        self.actions = actions.into();
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn actions(&self) -> &[ActionSpec] {
        &self.actions
    }

    /// Draws one stat block.
    pub fn roll_stats<R: RngSource + ?Sized>(&self, rng: &mut R) -> Result<StatBlock, ConfigError> {
        let variance = self.config.stat_variance;
        let mut roll = |base: f64| base * (1.0 + variance * rng.signed_unit_f64());
        let max_health = roll(self.config.base_health);
        let attack = roll(self.config.base_attack);
        let defense = roll(self.config.base_defense);
        let speed = roll(self.config.base_speed);
        StatBlock::new(max_health, attack, defense, speed)
    }

    /// Spawns both teams. Players take ids `0..player_count`, enemies follow.
    pub fn spawn<R: RngSource + ?Sized>(
        &self,
        player_count: usize,
        enemy_count: usize,
        rng: &mut R,
    ) -> Result<Roster, SetupError> {
        self.config.validate()?;

        let mut roster = Roster::default();
        let mut next_id = 0u32;
        for (team, count, prefix) in [
            (Team::Player, player_count, "Player"),
            (Team::Enemy, enemy_count, "Enemy"),
        ] {
            for index in 0..count {
                let stats = self.roll_stats(rng)?;
                let combatant = Combatant::spawn(
                    CombatantId(next_id),
                    format!("{prefix}_{index}"),
                    team,
                    stats,
                    &self.actions,
                    &self.config,
                )?;
                roster.push(combatant);
                next_id += 1;
            }
        }
        Ok(roster)
    }
}
