use crate::consumable::ConsumableKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position, RegistryError, StatusEffectKind};

/// Reasons a consumable use is rejected. A rejected use mutates nothing and
/// keeps its charge.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableError {
    #[error("no {0} left")]
    OutOfCharge(ConsumableKind),

    #[error("cannot target {0}")]
    InvalidTarget(Position),

    #[error("{0} needs a target")]
    MissingTarget(ConsumableKind),

    #[error("user {0} not found")]
    NotFound(EntityId),

    #[error("{0} has no effect defined")]
    Undefined(ConsumableKind),

    #[error("{0} is already active")]
    AlreadyActive(StatusEffectKind),

    #[error("health is already full")]
    HealthFull,

    #[error("no targets within range")]
    NoTargets,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for ConsumableError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ConsumableError::NotFound(_) | ConsumableError::OutOfCharge(_) => {
                ErrorSeverity::Recoverable
            }
            ConsumableError::Undefined(_) => ErrorSeverity::Internal,
            ConsumableError::Registry(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConsumableError::OutOfCharge(_) => "CONSUMABLE_OUT_OF_CHARGE",
            ConsumableError::InvalidTarget(_) => "CONSUMABLE_INVALID_TARGET",
            ConsumableError::MissingTarget(_) => "CONSUMABLE_MISSING_TARGET",
            ConsumableError::NotFound(_) => "CONSUMABLE_USER_NOT_FOUND",
            ConsumableError::Undefined(_) => "CONSUMABLE_UNDEFINED",
            ConsumableError::AlreadyActive(_) => "CONSUMABLE_ALREADY_ACTIVE",
            ConsumableError::HealthFull => "CONSUMABLE_HEALTH_FULL",
            ConsumableError::NoTargets => "CONSUMABLE_NO_TARGETS",
            ConsumableError::Registry(err) => err.error_code(),
        }
    }
}
