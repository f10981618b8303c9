//! Actions a combatant can take and how their targets are chosen.
//!
//! - [`catalog`] builds each combatant's repertoire of effect producers
//! - [`targeting`] picks a target for a fired action

pub mod catalog;
pub mod targeting;

pub use catalog::{ActionCatalog, ActionSpec, ActionTemplate};
pub use targeting::TargetSelector;
