//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the battle, querying it and streaming its events.
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleOutcome, BattleSnapshot, Team};

use super::errors::{Result, RuntimeError};
use super::events::RuntimeEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<RuntimeEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Advance the battle by `dt` seconds and return the resulting outcome.
    pub async fn advance(&self, dt: f64) -> Result<BattleOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Advance {
                dt,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query a read-only snapshot of both rosters
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the current outcome without advancing
    pub async fn outcome(&self) -> Result<BattleOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryOutcome { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Drive the battle with a fixed step until it finishes.
    ///
    /// Sleeps `pacing` between steps when given, which lets a front-end watch
    /// the battle in real time. Returns the winner, or `None` if `max_ticks`
    /// steps ran without a result.
    pub async fn run_until_finished(
        &self,
        dt: f64,
        max_ticks: u64,
        pacing: Option<Duration>,
    ) -> Result<Option<Team>> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(RuntimeError::InvalidStep { dt });
        }

        for _ in 0..max_ticks {
            if let BattleOutcome::Finished { winner } = self.advance(dt).await? {
                return Ok(Some(winner));
            }
            if let Some(pause) = pacing.filter(|pause| !pause.is_zero()) {
                tokio::time::sleep(pause).await;
            }
        }
        Ok(self.outcome().await?.winner())
    }

    /// Subscribe to runtime events
    pub fn subscribe_events(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.event_tx.subscribe()
    }
}
