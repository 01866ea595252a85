use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Attacker or defender is not a live entity.
    #[error("entity {0} not found")]
    NotFound(EntityId),

    /// Defender cannot take damage (NPCs, projectiles).
    #[error("entity {0} cannot be attacked")]
    NotCombatant(EntityId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::NotFound(_) => ErrorSeverity::Recoverable,
            CombatError::NotCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::NotFound(_) => "COMBAT_NOT_FOUND",
            CombatError::NotCombatant(_) => "COMBAT_NOT_COMBATANT",
        }
    }
}
