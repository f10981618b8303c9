//! Roster loader.
//!
//! A roster file is a RON list of [`CombatantSpec`] entries:
//!
//! ```text
//! [
//!     (name: "Knight", team: Player, max_health: 120.0, attack: 55.0,
//!      defense: 60.0, speed: 40.0, actions: [Damage, Buff(Some(Defense))]),
//!     (name: "Imp", team: Enemy, max_health: 70.0, attack: 45.0,
//!      defense: 30.0, speed: 65.0),
//! ]
//! ```
//!
//! Entries without `actions` get one action of every kind.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};
use crate::roster::{CombatantSpec, Roster};

/// Loader for hand-written rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the raw entries from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantSpec>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON {}: {}", path.display(), e))
    }

    /// Load a RON roster and spawn every entry against `config`.
    pub fn load_roster(path: &Path, config: &BattleConfig) -> LoadResult<Roster> {
        let specs = Self::load(path)?;
        Roster::from_specs(&specs, config).map_err(|e| {
            anyhow::anyhow!("Failed to build roster from {}: {}", path.display(), e)
        })
    }
}
