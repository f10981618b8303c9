//! Error types surfaced by the runtime API.
//!
//! The simulation itself never fails mid-battle; everything here is about
//! talking to the worker task.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("step size must be positive and finite, got {dt}")]
    InvalidStep { dt: f64 },
}
