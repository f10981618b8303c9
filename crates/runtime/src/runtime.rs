//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and hands out [`RuntimeHandle`]s for clients to drive the battle.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::BattleSimulation;

use crate::api::{Result, RuntimeError, RuntimeEvent, RuntimeHandle};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1024,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one battle on a background task.
///
/// Must be started from inside a tokio runtime.
pub struct BattleRuntime {
    handle: RuntimeHandle,
    command_tx: mpsc::Sender<Command>,
    sim_worker_handle: JoinHandle<BattleSimulation>,
}

impl BattleRuntime {
    /// Start a worker for `simulation` with the default channel sizes.
    pub fn start(simulation: BattleSimulation) -> Self {
        Self::with_config(simulation, RuntimeConfig::default())
    }

    pub fn with_config(simulation: BattleSimulation, config: RuntimeConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<RuntimeEvent>(config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_tx.clone());

        let sim_worker = SimulationWorker::new(simulation, command_rx, event_tx);
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        Self {
            handle,
            command_tx,
            sim_worker_handle,
        }
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events
    pub fn subscribe_events(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.handle.subscribe_events()
    }

    /// Stop the worker and return the simulation in its final state.
    ///
    /// Outstanding handles stop working once this returns.
    pub async fn shutdown(self) -> Result<BattleSimulation> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}
