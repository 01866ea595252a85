//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the simulation, reading snapshots and streaming events from
//! specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use game_core::{ActionError, CycleReport, PlayerAction, Snapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Outcome of one scheduler cycle as seen by the caller: the report, or the
/// reason the action was rejected (the world is untouched in that case).
pub type CycleResult = std::result::Result<CycleReport, ActionError>;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    snapshots: watch::Receiver<Arc<Snapshot>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        snapshots: watch::Receiver<Arc<Snapshot>>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            snapshots,
        }
    }

    /// Submits a player action and waits for the cycle it triggers.
    pub async fn submit(&self, action: PlayerAction) -> Result<CycleResult> {
        self.request(|reply| Command::Submit { action, reply }).await
    }

    /// Runs one idle tick without a player action.
    pub async fn idle_tick(&self) -> Result<CycleResult> {
        self.request(|reply| Command::IdleTick { reply }).await
    }

    /// Latest snapshot, taken by the worker after the commands queued so far.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Receiver that observes a fresh snapshot after every cycle.
    ///
    /// Renderers hold this instead of polling: `changed().await` wakes once per
    /// published snapshot and `borrow()` never blocks the simulation.
    pub fn watch_snapshots(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshots.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - completed cycles and rejected actions
    /// - `Topic::Session` - mode changes, game over and quit
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Asks the worker to stop. Later commands fail with `CommandChannelClosed`.
    pub async fn quit(&self) -> Result<()> {
        self.request(|reply| Command::Quit { reply }).await
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
