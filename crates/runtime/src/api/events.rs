//! Events published by the runtime for front-ends to observe.
//!
//! Consumers subscribe through [`RuntimeHandle::subscribe_events`] and react
//! without blocking the worker loop. Slow subscribers may lag and miss
//! events; the worker never waits for them.
//!
//! [`RuntimeHandle::subscribe_events`]: super::RuntimeHandle::subscribe_events
use battle_core::{BattleEvent, BattleOutcome};

#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeEvent {
    /// Something happened inside the simulation.
    Battle(BattleEvent),
    /// An `advance` call completed. Sent after that step's battle events.
    Stepped {
        step: u64,
        clock: f64,
        outcome: BattleOutcome,
    },
}
