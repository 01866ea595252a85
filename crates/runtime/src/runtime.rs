//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use game_content::GameContent;
use game_core::{ConsumableCatalog, GameConfig, GameOver, GameState};

use crate::api::{CycleResult, InputProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Drive idle ticks from a wall-clock ticker while awaiting input.
    pub realtime: bool,
    /// Wall-clock pacing of idle ticks.
    pub tick_interval: Duration,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Defaults overridden by `DUNGEON_TICK_MS`, `DUNGEON_REALTIME`,
    /// `DUNGEON_EVENT_BUFFER` and `DUNGEON_COMMAND_BUFFER`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>(&lookup, "DUNGEON_TICK_MS").filter(|ms| *ms > 0) {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(realtime) = parse_var::<bool>(&lookup, "DUNGEON_REALTIME") {
            config.realtime = realtime;
        }
        if let Some(size) = parse_var::<usize>(&lookup, "DUNGEON_EVENT_BUFFER").filter(|n| *n > 0) {
            config.event_buffer_size = size;
        }
        if let Some(size) = parse_var::<usize>(&lookup, "DUNGEON_COMMAND_BUFFER").filter(|n| *n > 0)
        {
            config.command_buffer_size = size;
        }
        config
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "runtime::session", key, value = %raw, "Ignoring invalid environment value");
            None
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            realtime: true,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Main runtime that orchestrates the game session
///
/// [`RuntimeHandle`] provides a cloneable façade for clients; the runtime
/// itself adds the input-provider loop and worker lifetime.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn InputProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Awaits one action from the input provider and submits it.
    ///
    /// Returns `None` once the provider has no more actions; the runtime has
    /// been asked to quit by then.
    pub async fn step(&mut self) -> Result<Option<CycleResult>> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let snapshot = self.handle.snapshot().await?;
        let Some(action) = provider.next_action(&snapshot).await? else {
            debug!(target: "runtime::session", "Input provider finished");
            self.handle.quit().await?;
            return Ok(None);
        };

        self.handle.submit(action).await.map(Some)
    }

    /// Runs the game loop until the game ends or the provider quits.
    ///
    /// Returns the game-over outcome, or `None` when the player quit first.
    pub async fn run(&mut self) -> Result<Option<GameOver>> {
        loop {
            match self.step().await? {
                None => return Ok(None),
                Some(Ok(report)) => {
                    if let Some(outcome) = report.game_over {
                        info!(target: "runtime::session", %outcome, "Session finished");
                        return Ok(Some(outcome));
                    }
                }
                // Rejections are already published; ask the provider again.
                Some(Err(_)) => {}
            }
        }
    }

    /// Set the player input provider
    pub fn set_player_provider(&mut self, provider: impl InputProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already have stopped after a quit.
        let _ = self.handle.quit().await;
        drop(self.handle);

        self.sim_worker_handle.await.map_err(|join| {
            error!(target: "runtime::worker", error = %join, "Simulation worker exited unexpectedly");
            RuntimeError::WorkerJoin(join)
        })
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    catalog: ConsumableCatalog,
    player_provider: Option<Box<dyn InputProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            catalog: ConsumableCatalog::default(),
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state (required)
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consumable effects (defaults to the stock catalog)
    pub fn catalog(mut self, catalog: ConsumableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Uses everything loaded by a `ContentFactory`: game config, catalog and
    /// initial state. Runtime-only settings stay as configured.
    pub fn content(mut self, content: GameContent) -> Self {
        self.config.game_config = content.config;
        self.catalog = content.catalog;
        self.state = Some(content.state);
        self
    }

    /// Set player input provider (needed for `step`/`run` only)
    pub fn player_provider(mut self, provider: impl InputProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn the simulation worker
    pub async fn build(self) -> Result<Runtime> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let tick_interval = self.config.realtime.then_some(self.config.tick_interval);

        let (sim_worker, snapshots) = SimulationWorker::new(
            state,
            self.config.game_config,
            self.catalog,
            command_rx,
            event_bus.clone(),
            tick_interval,
        );
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus, snapshots),
            player_provider: self.player_provider,
            sim_worker_handle,
        })
    }
}
