//! Player action rejection.

use crate::combat::CombatError;
use crate::consumable::ConsumableError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameOver, Position, RegistryError, SchedulerPhase};

/// Why a player action was rejected.
///
/// A rejected action mutates nothing; the scheduler stays in
/// `AwaitingPlayerInput` and the caller may submit another action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Consumable(#[from] ConsumableError),

    #[error("nothing to attack at {0}")]
    NothingToAttack(Position),

    #[error("no player in the world")]
    NoPlayer,

    #[error("scheduler is in {0}, not awaiting input")]
    NotAwaitingInput(SchedulerPhase),

    #[error("game is over: {0}")]
    GameOver(GameOver),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Registry(err) => err.severity(),
            ActionError::Combat(err) => err.severity(),
            ActionError::Consumable(err) => err.severity(),
            ActionError::NothingToAttack(_) => ErrorSeverity::Validation,
            ActionError::NoPlayer | ActionError::NotAwaitingInput(_) => ErrorSeverity::Internal,
            ActionError::GameOver(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Registry(err) => err.error_code(),
            ActionError::Combat(err) => err.error_code(),
            ActionError::Consumable(err) => err.error_code(),
            ActionError::NothingToAttack(_) => "ACTION_NOTHING_TO_ATTACK",
            ActionError::NoPlayer => "ACTION_NO_PLAYER",
            ActionError::NotAwaitingInput(_) => "ACTION_NOT_AWAITING_INPUT",
            ActionError::GameOver(_) => "ACTION_GAME_OVER",
        }
    }
}
