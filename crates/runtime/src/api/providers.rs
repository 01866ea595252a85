//! Asynchronous abstraction for sourcing player intent.
//!
//! The player's decision is the only point where the game loop suspends.
//! Runtime users plug in an [`InputProvider`] so the same loop runs with a
//! terminal front end, a network client, or a scripted fixture.
use std::collections::VecDeque;

use async_trait::async_trait;
use game_core::{PlayerAction, Snapshot};
use tokio::sync::{Mutex, mpsc};

use super::errors::Result;

/// Supplies the player's next action.
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Next action given the latest snapshot, or `None` to quit.
    async fn next_action(&self, snapshot: &Snapshot) -> Result<Option<PlayerAction>>;
}

/// Always waits. Handy for soak tests.
pub struct WaitProvider;

#[async_trait]
impl InputProvider for WaitProvider {
    async fn next_action(&self, _snapshot: &Snapshot) -> Result<Option<PlayerAction>> {
        Ok(Some(PlayerAction::Wait))
    }
}

/// Plays a fixed list of actions, then quits.
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<PlayerAction>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl InputProvider for ScriptedProvider {
    async fn next_action(&self, _snapshot: &Snapshot) -> Result<Option<PlayerAction>> {
        Ok(self.actions.lock().await.pop_front())
    }
}

/// Forwards actions sent by a front end; quits when the sender is dropped.
pub struct ChannelProvider {
    rx: Mutex<mpsc::Receiver<PlayerAction>>,
}

impl ChannelProvider {
    pub fn new(rx: mpsc::Receiver<PlayerAction>) -> Self {
        Self { rx: Mutex::new(rx) }
    }

    /// A provider together with the sender feeding it.
    pub fn channel(capacity: usize) -> (mpsc::Sender<PlayerAction>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl InputProvider for ChannelProvider {
    async fn next_action(&self, _snapshot: &Snapshot) -> Result<Option<PlayerAction>> {
        Ok(self.rx.lock().await.recv().await)
    }
}
