//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! through [`game_core::GameEngine`], publishes events to the [`EventBus`] and
//! a fresh [`Snapshot`] on the watch channel after every cycle. When the
//! runtime is real-time, a ticker drives idle ticks between commands.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use game_core::{
    ConsumableCatalog, GameConfig, GameEngine, GameEnv, GameError, GameState, PlayerAction,
    Snapshot,
};

use crate::api::CycleResult;
use crate::events::{Event, EventBus, GameStateEvent, SessionEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run a full cycle for a player action.
    Submit {
        action: PlayerAction,
        reply: oneshot::Sender<CycleResult>,
    },
    /// Run one idle tick.
    IdleTick { reply: oneshot::Sender<CycleResult> },
    /// Snapshot of the current state.
    Snapshot { reply: oneshot::Sender<Arc<Snapshot>> },
    /// Stop the worker.
    Quit { reply: oneshot::Sender<()> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    catalog: ConsumableCatalog,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    snapshot_tx: watch::Sender<Arc<Snapshot>>,
    /// Wall-clock pacing of idle ticks; `None` disables the ticker.
    tick_interval: Option<Duration>,
}

impl SimulationWorker {
    /// Creates a new simulation worker and the receiver observing its snapshots.
    pub fn new(
        state: GameState,
        config: GameConfig,
        catalog: ConsumableCatalog,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
    ) -> (Self, watch::Receiver<Arc<Snapshot>>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Snapshot::capture(&state, &config)));

        info!(
            target: "runtime::worker",
            entities = state.entities.len(),
            realtime = tick_interval.is_some(),
            "SimulationWorker initialized"
        );

        let worker = Self {
            state,
            config,
            catalog,
            command_rx,
            event_bus,
            snapshot_tx,
            tick_interval,
        };
        (worker, snapshot_rx)
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let period = self.tick_interval.unwrap_or(Duration::from_secs(3600));
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of an interval completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if !self.handle_command(command) {
                            break;
                        }
                    }
                    None => {
                        debug!(target: "runtime::worker", "All handles dropped, stopping");
                        break;
                    }
                },
                _ = ticker.tick(), if self.ticker_active() => {
                    self.handle_ticker();
                }
            }
        }

        info!(
            target: "runtime::worker",
            clock = %self.state.now(),
            nonce = self.state.turn.nonce,
            "SimulationWorker stopped"
        );
    }

    /// Returns false when the worker should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Submit { action, reply } => {
                let result = self.run_cycle(Some(action));
                if reply.send(result).is_err() {
                    warn!(target: "runtime::worker", "Submit reply channel closed (caller dropped)");
                }
            }
            Command::IdleTick { reply } => {
                let result = self.run_cycle(None);
                if reply.send(result).is_err() {
                    warn!(target: "runtime::worker", "IdleTick reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.snapshot_tx.borrow().clone()).is_err() {
                    warn!(target: "runtime::worker", "Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Quit { reply } => {
                info!(target: "runtime::session", clock = %self.state.now(), "Quit requested");
                // Commands sent after this point fail instead of queueing.
                self.command_rx.close();
                self.event_bus.publish(Event::Session(SessionEvent::Quit {
                    clock: self.state.now(),
                }));
                if reply.send(()).is_err() {
                    warn!(target: "runtime::worker", "Quit reply channel closed (caller dropped)");
                }
                return false;
            }
        }
        true
    }

    fn ticker_active(&self) -> bool {
        self.tick_interval.is_some() && !self.state.is_over() && !self.state.idle_suspended()
    }

    fn handle_ticker(&mut self) {
        if let Err(error) = self.run_cycle(None) {
            debug!(
                target: "runtime::ticker",
                code = error.error_code(),
                "Idle tick skipped"
            );
        }
    }

    /// Runs one scheduler cycle and publishes its results.
    fn run_cycle(&mut self, action: Option<PlayerAction>) -> CycleResult {
        let env = GameEnv::new(&self.config, &self.catalog);
        let mut engine = GameEngine::new(&mut self.state, env);
        let result = match action {
            Some(action) => engine.submit(action),
            None => engine.idle_tick(),
        };

        match &result {
            Ok(report) => {
                debug!(
                    target: "runtime::worker",
                    clock = %report.clock,
                    ticks = report.ticks_run,
                    projectiles = self.state.projectiles_in_flight(),
                    enemy_actions = report.enemies.len(),
                    "Cycle completed"
                );

                self.event_bus
                    .publish(Event::GameState(GameStateEvent::CycleCompleted {
                        nonce: self.state.turn.nonce,
                        action,
                        report: Box::new(report.clone()),
                    }));

                if report.mode_changed {
                    info!(target: "runtime::session", mode = %report.mode, clock = %report.clock, "Mode changed");
                    self.event_bus.publish(Event::Session(SessionEvent::ModeChanged {
                        mode: report.mode,
                        clock: report.clock,
                    }));
                }
                if let Some(outcome) = report.game_over {
                    info!(target: "runtime::session", %outcome, clock = %report.clock, "Game over");
                    self.event_bus.publish(Event::Session(SessionEvent::GameOver {
                        outcome,
                        clock: report.clock,
                    }));
                }

                self.snapshot_tx
                    .send_replace(Arc::new(Snapshot::capture(&self.state, &self.config)));
            }
            Err(error) => {
                if let Some(action) = action {
                    debug!(
                        target: "runtime::worker",
                        %action,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        %error,
                        "Action rejected"
                    );
                    self.event_bus
                        .publish(Event::GameState(GameStateEvent::ActionRejected {
                            action,
                            code: error.error_code().to_string(),
                            severity: error.severity(),
                            error: error.clone(),
                            clock: self.state.now(),
                        }));
                }
            }
        }

        result
    }
}
