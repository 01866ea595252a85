//! Event types for different topics.

use game_core::{ActionError, CycleReport, ErrorSeverity, GameMode, GameOver, PlayerAction, Tick};
use serde::{Deserialize, Serialize};

/// Per-cycle events: everything that changed the world or was refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A player action or idle tick completed a scheduler cycle.
    CycleCompleted {
        /// Scheduler nonce after the cycle.
        nonce: u64,
        /// The submitted action, `None` for idle ticks.
        action: Option<PlayerAction>,
        report: Box<CycleReport>,
    },

    /// A player action was rejected; the world is unchanged.
    ActionRejected {
        action: PlayerAction,
        /// Stable error code, see `game_core::GameError::error_code`.
        code: String,
        severity: ErrorSeverity,
        error: ActionError,
        clock: Tick,
    },
}

/// Coarse session transitions (lightweight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    ModeChanged { mode: GameMode, clock: Tick },
    GameOver { outcome: GameOver, clock: Tick },
    Quit { clock: Tick },
}
