//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the worker and orchestrator can stay internal.

pub mod errors;
pub mod events;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use events::RuntimeEvent;
pub use handle::RuntimeHandle;
