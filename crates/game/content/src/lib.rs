//! Battle setup: roster construction and data-file loaders.
//!
//! This crate turns configuration into combatants ready for
//! [`battle_core::BattleSimulation`]:
//! - [`RosterFactory`] spawns randomized teams around the configured base stats
//! - [`CombatantSpec`] / [`Roster`] describe hand-written teams
//! - [`loaders`] read `BattleConfig` from TOML and roster specs from RON
//!
//! Nothing here runs the simulation; setup ends once a [`Roster`] exists.

mod factory;
mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use factory::RosterFactory;
pub use roster::{CombatantSpec, Roster};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, RosterLoader};
