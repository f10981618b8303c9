//! Combatant stat model.
//!
//! A [`StatBlock`] holds the mutable numbers of one combatant: a health pool
//! plus the three combat stats that buffs and debuffs scale.

mod block;

pub use block::{DamageOutcome, StatBlock, StatKind};
