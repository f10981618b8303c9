//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the single owner of the battle; everything else
//! talks to it through commands.

mod simulation;

pub use simulation::{Command, SimulationWorker};
