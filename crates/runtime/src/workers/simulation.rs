//! Simulation worker that owns the authoritative [`BattleSimulation`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), steps the
//! battle, logs every drained [`BattleEvent`] and republishes it as a
//! [`RuntimeEvent`].

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use battle_core::{BattleEvent, BattleOutcome, BattleSimulation, BattleSnapshot};

use crate::api::RuntimeEvent;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance the battle by `dt` seconds.
    Advance {
        dt: f64,
        reply: oneshot::Sender<BattleOutcome>,
    },
    /// Query a snapshot of both rosters (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
    /// Query the current outcome (read-only).
    QueryOutcome {
        reply: oneshot::Sender<BattleOutcome>,
    },
    /// Stop the worker and hand the simulation back.
    Shutdown,
}

/// Background task that processes battle commands.
pub struct SimulationWorker {
    simulation: BattleSimulation,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<RuntimeEvent>,
    steps: u64,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        simulation: BattleSimulation,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            simulation,
            command_rx,
            event_tx,
            steps: 0,
        }
    }

    /// Main worker loop. Returns the simulation once every handle is gone or
    /// a shutdown is requested.
    pub async fn run(mut self) -> BattleSimulation {
        while let Some(cmd) = self.command_rx.recv().await {
            if matches!(cmd, Command::Shutdown) {
                debug!(target: "runtime::worker", steps = self.steps, "Shutdown requested");
                break;
            }
            self.handle_command(cmd);
        }
        self.simulation
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { dt, reply } => {
                let outcome = self.advance(dt);
                let _ = reply.send(outcome);
            }
            Command::QuerySnapshot { reply } => {
                let _ = reply.send(self.simulation.snapshot());
            }
            Command::QueryOutcome { reply } => {
                let _ = reply.send(self.simulation.outcome());
            }
            Command::Shutdown => {}
        }
    }

    fn advance(&mut self, dt: f64) -> BattleOutcome {
        let outcome = self.simulation.advance(dt);
        self.steps += 1;

        for event in self.simulation.drain_events() {
            log_event(&event);
            let _ = self.event_tx.send(RuntimeEvent::Battle(event));
        }
        let _ = self.event_tx.send(RuntimeEvent::Stepped {
            step: self.steps,
            clock: self.simulation.clock(),
            outcome,
        });
        outcome
    }
}

fn log_event(event: &BattleEvent) {
    match event {
        BattleEvent::ActionResolved {
            clock,
            actor,
            target,
            kind,
            amount,
            critical,
        } => debug!(
            target: "runtime::worker",
            clock,
            actor = %actor,
            recipient = %target,
            kind = %kind,
            amount,
            critical,
            "Action resolved"
        ),
        BattleEvent::ActionSkipped {
            clock,
            actor,
            kind,
            reason,
        } => debug!(
            target: "runtime::worker",
            clock,
            actor = %actor,
            kind = ?kind,
            reason = %reason,
            "Action skipped"
        ),
        BattleEvent::ModifierApplied {
            clock,
            source,
            target,
            kind,
            stat,
        } => debug!(
            target: "runtime::worker",
            clock,
            source = %source,
            recipient = %target,
            kind = %kind,
            stat = %stat,
            "Stat modifier applied"
        ),
        BattleEvent::PeriodicTick {
            clock,
            source,
            target,
            kind,
            ticks,
            amount,
        } => debug!(
            target: "runtime::worker",
            clock,
            source = %source,
            recipient = %target,
            kind = %kind,
            ticks,
            amount,
            "Periodic effect ticked"
        ),
        BattleEvent::ModifierReverted {
            clock,
            source,
            target,
            kind,
            stat,
        } => debug!(
            target: "runtime::worker",
            clock,
            source = %source,
            recipient = %target,
            kind = %kind,
            stat = %stat,
            "Stat modifier reverted"
        ),
        BattleEvent::EffectExpired {
            clock,
            source,
            target,
            kind,
        } => debug!(
            target: "runtime::worker",
            clock,
            source = %source,
            recipient = %target,
            kind = %kind,
            "Effect expired"
        ),
        BattleEvent::CombatantDied {
            clock,
            id,
            team,
            killer,
        } => info!(
            target: "runtime::worker",
            clock,
            combatant = %id,
            team = %team,
            killer = ?killer,
            "Combatant died"
        ),
        BattleEvent::BattleFinished { clock, winner } => info!(
            target: "runtime::worker",
            clock,
            winner = %winner,
            "Battle finished"
        ),
    }
}
