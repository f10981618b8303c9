//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything the `battle` binary needs to set up and drive one battle.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Seed for roster generation and the simulation's random source.
    pub seed: u64,
    pub player_count: usize,
    pub enemy_count: usize,
    /// Simulated seconds per step.
    pub dt: f64,
    /// Real-time pause between steps; 0 runs as fast as possible.
    pub pacing_ms: u64,
    /// Step cap; the run stops without a winner once it is reached.
    pub max_ticks: u64,
    /// TOML file overriding `BattleConfig` defaults.
    pub config_path: Option<PathBuf>,
    /// RON roster; when absent the teams are generated from the seed.
    pub roster_path: Option<PathBuf>,
    /// Print the final snapshot as JSON on stdout.
    pub snapshot_json: bool,
    /// Also write logs to `battle.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_count: 3,
            enemy_count: 3,
            dt: 0.1,
            pacing_ms: 0,
            max_ticks: 100_000,
            config_path: None,
            roster_path: None,
            snapshot_json: false,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Random seed (default: current UNIX time)
    /// - `BATTLE_PLAYERS` / `BATTLE_ENEMIES` - Generated team sizes (default: 3)
    /// - `BATTLE_DT` - Seconds per step (default: 0.1)
    /// - `BATTLE_PACING_MS` - Sleep between steps (default: 0)
    /// - `BATTLE_MAX_TICKS` - Step cap (default: 100000)
    /// - `BATTLE_CONFIG` - TOML balance file (optional)
    /// - `BATTLE_ROSTER` - RON roster file (optional)
    /// - `BATTLE_SNAPSHOT_JSON` - Print the final snapshot as JSON (default: false)
    /// - `BATTLE_LOG_DIR` - Directory for a log file (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            seed: parse(lookup("BATTLE_SEED")).unwrap_or_else(time_seed),
            ..Self::default()
        };

        if let Some(count) = parse::<usize>(lookup("BATTLE_PLAYERS")) {
            config.player_count = count;
        }
        if let Some(count) = parse::<usize>(lookup("BATTLE_ENEMIES")) {
            config.enemy_count = count;
        }
        if let Some(dt) = parse::<f64>(lookup("BATTLE_DT")).filter(|dt| dt.is_finite() && *dt > 0.0)
        {
            config.dt = dt;
        }
        if let Some(pacing) = parse::<u64>(lookup("BATTLE_PACING_MS")) {
            config.pacing_ms = pacing;
        }
        if let Some(max_ticks) = parse::<u64>(lookup("BATTLE_MAX_TICKS")) {
            config.max_ticks = max_ticks.max(1);
        }

        config.config_path = lookup("BATTLE_CONFIG").map(PathBuf::from);
        config.roster_path = lookup("BATTLE_ROSTER").map(PathBuf::from);
        config.log_dir = lookup("BATTLE_LOG_DIR").map(PathBuf::from);

        // Accept a bare `BATTLE_SNAPSHOT_JSON=` as "true".
        if let Some(enable) = parse::<bool>(lookup("BATTLE_SNAPSHOT_JSON")) {
            config.snapshot_json = enable;
        } else if lookup("BATTLE_SNAPSHOT_JSON").is_some() {
            config.snapshot_json = true;
        }

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("BATTLE_SEED", "42"),
            ("BATTLE_PLAYERS", "5"),
            ("BATTLE_ENEMIES", "2"),
            ("BATTLE_DT", "0.25"),
            ("BATTLE_PACING_MS", "16"),
            ("BATTLE_MAX_TICKS", "900"),
            ("BATTLE_CONFIG", "data/config/battle.toml"),
            ("BATTLE_ROSTER", "data/rosters/skirmish.ron"),
            ("BATTLE_SNAPSHOT_JSON", "true"),
            ("BATTLE_LOG_DIR", "/tmp/battle-logs"),
        ]);
        assert_eq!(
            config,
            ClientConfig {
                seed: 42,
                player_count: 5,
                enemy_count: 2,
                dt: 0.25,
                pacing_ms: 16,
                max_ticks: 900,
                config_path: Some(PathBuf::from("data/config/battle.toml")),
                roster_path: Some(PathBuf::from("data/rosters/skirmish.ron")),
                snapshot_json: true,
                log_dir: Some(PathBuf::from("/tmp/battle-logs")),
            }
        );
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = config_from(&[("BATTLE_SEED", "7")]);
        assert_eq!(
            config,
            ClientConfig {
                seed: 7,
                ..ClientConfig::default()
            }
        );
    }

    #[test]
    fn invalid_values_are_ignored() {
        let config = config_from(&[
            ("BATTLE_SEED", "1"),
            ("BATTLE_DT", "-3"),
            ("BATTLE_PLAYERS", "many"),
            ("BATTLE_MAX_TICKS", "0"),
        ]);
        assert_eq!(config.dt, 0.1);
        assert_eq!(config.player_count, 3);
        assert_eq!(config.max_ticks, 1);
    }

    #[test]
    fn bare_snapshot_flag_enables_json() {
        let config = config_from(&[("BATTLE_SEED", "1"), ("BATTLE_SNAPSHOT_JSON", "")]);
        assert!(config.snapshot_json);
    }
}
