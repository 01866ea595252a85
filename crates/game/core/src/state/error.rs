//! Entity registry errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised by [`EntityRegistry`](crate::state::EntityRegistry) operations.
///
/// None of these leave the registry partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// The id does not name a live entity (never spawned or already despawned).
    #[error("entity {0} not found")]
    NotFound(EntityId),

    /// Target tile is not walkable or holds another blocking entity.
    #[error("position {position} is blocked{}", occupant.map(|id| format!(" by {id}")).unwrap_or_default())]
    Blocked {
        position: Position,
        occupant: Option<EntityId>,
    },

    /// Target lies outside the grid.
    #[error("position {0} is out of bounds")]
    OutOfBounds(Position),

    /// Entity id space is exhausted.
    #[error("entity id overflow")]
    IdOverflow,

    /// An entity with zero maximum health would spawn already dead.
    #[error("entity has no health")]
    Lifeless,

    /// More abilities than an entity has slots for.
    #[error("{0} abilities exceed the slot limit")]
    TooManyAbilities(usize),

    /// Projectile speed must be positive or the projectile never leaves its tile.
    #[error("projectile speed {0} is not positive")]
    StalledProjectile(i32),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::NotFound(_)
            | RegistryError::OutOfBounds(_)
            | RegistryError::Blocked { .. } => ErrorSeverity::Recoverable,
            RegistryError::Lifeless
            | RegistryError::TooManyAbilities(_)
            | RegistryError::StalledProjectile(_) => ErrorSeverity::Validation,
            RegistryError::IdOverflow => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::NotFound(_) => "REGISTRY_NOT_FOUND",
            RegistryError::Blocked { .. } => "REGISTRY_BLOCKED",
            RegistryError::OutOfBounds(_) => "REGISTRY_OUT_OF_BOUNDS",
            RegistryError::IdOverflow => "REGISTRY_ID_OVERFLOW",
            RegistryError::Lifeless => "REGISTRY_LIFELESS",
            RegistryError::TooManyAbilities(_) => "REGISTRY_TOO_MANY_ABILITIES",
            RegistryError::StalledProjectile(_) => "REGISTRY_STALLED_PROJECTILE",
        }
    }
}
