//! Combatant state and read-only views.
//!
//! [`Combatant`] owns everything about one participant: its stats, its
//! repertoire, the effects currently applied to it and its action countdown.
//! Hosts and UI layers read [`CombatantSnapshot`]s and never touch the live
//! structs.
mod combatant;
mod common;
mod snapshot;

pub use combatant::Combatant;
pub use common::{CombatantId, Team};
pub use snapshot::{BattleSnapshot, CombatantSnapshot, EffectSnapshot};
