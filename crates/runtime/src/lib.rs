//! Async host for a [`battle_core::BattleSimulation`].
//!
//! The simulation itself is synchronous and single-threaded. This crate moves
//! it onto a tokio task so a front-end can step it, query snapshots and
//! stream its events without owning it:
//! - [`runtime`] hosts the orchestrator that spawns the worker
//! - [`api`] exposes the handle, events and errors clients interact with
//! - `workers` keeps the background task internal to the crate
//!
//! Every battle event drained from the simulation is logged through
//! `tracing` (deaths and the final result at `info`, the rest at `debug`).
pub mod api;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeEvent, RuntimeHandle};
pub use runtime::{BattleRuntime, RuntimeConfig};
