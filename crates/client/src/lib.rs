//! Battle client library.
//!
//! The `battle` binary is a thin composition root over these modules:
//! - [`config`] reads `BATTLE_*` environment variables
//! - [`logging`] installs the tracing subscriber
//! - [`app`] builds the simulation and drives it through the runtime
pub mod app;
pub mod config;
pub mod logging;

pub use app::{BattleReport, build_simulation, run};
pub use config::ClientConfig;
