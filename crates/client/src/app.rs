//! Battle setup and the host loop.

use std::time::Duration;

use anyhow::Result;
use battle_content::{ConfigLoader, RosterFactory, RosterLoader};
use battle_core::{BattleConfig, BattleSimulation, BattleSnapshot, PcgRng, Team};
use battle_runtime::BattleRuntime;

use crate::config::ClientConfig;

/// Final state of one run.
#[derive(Clone, Debug)]
pub struct BattleReport {
    pub winner: Option<Team>,
    pub snapshot: BattleSnapshot,
    pub starting_players: usize,
    pub starting_enemies: usize,
}

impl BattleReport {
    /// Human-readable result, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(match self.winner {
            Some(Team::Player) => format!("Players win after {:.1}s", self.snapshot.clock),
            Some(Team::Enemy) => format!("Enemies win after {:.1}s", self.snapshot.clock),
            None => format!("No winner after {:.1}s", self.snapshot.clock),
        });

        for (team, starting) in [
            (Team::Player, self.starting_players),
            (Team::Enemy, self.starting_enemies),
        ] {
            lines.push(format!(
                "{team}: {}/{starting} standing",
                self.snapshot.living(team)
            ));
            for combatant in self.snapshot.roster(team) {
                if combatant.current_health <= 0.0 {
                    continue;
                }
                lines.push(format!(
                    "  {} {} hp {:.1}/{:.1}",
                    combatant.name, combatant.id, combatant.current_health, combatant.max_health
                ));
            }
        }
        lines
    }
}

/// Loads the balance file and roster named in `config`, falling back to
/// defaults and a seeded random roster.
pub fn build_simulation(config: &ClientConfig) -> Result<BattleSimulation> {
    let battle_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => BattleConfig::default(),
    };

    let roster = match &config.roster_path {
        Some(path) => RosterLoader::load_roster(path, &battle_config)?,
        None => RosterFactory::new(battle_config.clone()).spawn(
            config.player_count,
            config.enemy_count,
            &mut PcgRng::new(config.seed),
        )?,
    };

    Ok(roster.into_simulation(battle_config, config.seed)?)
}

/// Runs one battle to completion (or the tick cap) on the runtime.
pub async fn run(config: &ClientConfig) -> Result<BattleReport> {
    let simulation = build_simulation(config)?;
    let starting_players = simulation.players().len();
    let starting_enemies = simulation.enemies().len();
    tracing::info!(
        seed = config.seed,
        players = starting_players,
        enemies = starting_enemies,
        dt = config.dt,
        "Battle starting"
    );

    let runtime = BattleRuntime::start(simulation);
    let handle = runtime.handle();

    let pacing = (config.pacing_ms > 0).then(|| Duration::from_millis(config.pacing_ms));
    let winner = handle
        .run_until_finished(config.dt, config.max_ticks, pacing)
        .await?;
    let snapshot = handle.snapshot().await?;
    runtime.shutdown().await?;

    match winner {
        Some(team) => tracing::info!(winner = %team, clock = snapshot.clock, "Battle over"),
        None => tracing::warn!(
            max_ticks = config.max_ticks,
            clock = snapshot.clock,
            "Tick cap reached without a winner"
        ),
    }

    Ok(BattleReport {
        winner,
        snapshot,
        starting_players,
        starting_enemies,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config(seed: u64) -> ClientConfig {
        ClientConfig {
            seed,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn default_setup_spawns_generated_teams() {
        let sim = build_simulation(&ClientConfig {
            player_count: 4,
            enemy_count: 2,
            ..config(8)
        })
        .unwrap();
        assert_eq!(sim.players().len(), 4);
        assert_eq!(sim.enemies().len(), 2);
        assert_eq!(sim.players()[0].name(), "Player_0");
    }

    #[test]
    fn files_override_generation() {
        let mut balance = tempfile::NamedTempFile::new().unwrap();
        writeln!(balance, "start_cooldown = 2.5").unwrap();
        let mut roster = tempfile::NamedTempFile::new().unwrap();
        write!(
            roster,
            r#"[
                (name: "Solo", team: Player, max_health: 80.0, attack: 40.0, defense: 40.0, speed: 40.0, actions: [Damage]),
                (name: "Dummy", team: Enemy, max_health: 60.0, attack: 10.0, defense: 10.0, speed: 10.0, actions: [Damage]),
            ]"#
        )
        .unwrap();

        let sim = build_simulation(&ClientConfig {
            config_path: Some(balance.path().to_path_buf()),
            roster_path: Some(roster.path().to_path_buf()),
            ..config(1)
        })
        .unwrap();
        assert_eq!(sim.config().start_cooldown, 2.5);
        assert_eq!(sim.players()[0].name(), "Solo");
        assert_eq!(sim.players()[0].action_countdown(), 2.5);
        assert_eq!(sim.enemies().len(), 1);
    }

    #[test]
    fn missing_roster_file_is_an_error() {
        let result = build_simulation(&ClientConfig {
            roster_path: Some("/nonexistent/roster.ron".into()),
            ..config(1)
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn one_sided_battle_reports_winner() {
        let report = run(&ClientConfig {
            player_count: 2,
            enemy_count: 0,
            ..config(3)
        })
        .await
        .unwrap();
        assert_eq!(report.winner, Some(Team::Player));
        assert_eq!(report.starting_players, 2);

        let lines = report.summary_lines();
        assert!(lines[0].starts_with("Players win"));
        assert_eq!(lines[1], "player: 2/2 standing");
    }
}
