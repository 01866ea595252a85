//! Authoritative game state.
//!
//! [`GameState`] is the single context object every resolver receives. It owns
//! the grid, the entity registry, the player's inventory and the scheduler
//! bookkeeping; nothing in the crate keeps ambient mutable state.
mod clock;
mod common;
mod entity;
mod error;
mod inventory;
mod registry;
mod status;
mod turn;

pub use clock::ActionClock;
pub use common::{Direction, EntityId, Position, ResourceMeter, Tick};
pub use entity::{
    Ability, AbilitySlot, AbilitySlots, Behavior, Entity, EntityFlags, EntityKind, EntitySpec,
    EntityView, ProjectilePattern, ProjectileSpec, ProjectileState, SUBTILES_PER_TILE, StatBlock,
    StatusInfliction, SubPosition, Velocity,
};
pub use error::RegistryError;
pub use inventory::{ConsumableStack, Inventory};
pub use registry::EntityRegistry;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use turn::{GameMode, GameOver, SchedulerPhase, TurnState};

use crate::env::{OutOfBounds, Tile, WorldGrid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Base seed for deterministic chance rolls; fixed for the whole game.
    pub seed: u64,
    pub turn: TurnState,
    pub grid: WorldGrid,
    pub entities: EntityRegistry,
    pub inventory: Inventory,
}

impl GameState {
    pub fn new(grid: WorldGrid) -> Self {
        Self::with_seed(grid, 0)
    }

    pub fn with_seed(grid: WorldGrid, seed: u64) -> Self {
        Self {
            seed,
            turn: TurnState::new(),
            grid,
            entities: EntityRegistry::new(),
            inventory: Inventory::empty(),
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Tick {
        self.turn.clock
    }

    pub fn tile_at(&self, position: Position) -> Result<Tile, OutOfBounds> {
        self.grid.tile_at(position)
    }

    /// True when the tile is inside the grid, has walkable terrain and holds
    /// no blocking entity.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.grid.is_passable(position) && self.entities.occupant(position).is_none()
    }

    pub fn spawn(&mut self, spec: EntitySpec, position: Position) -> Result<EntityId, RegistryError> {
        self.entities.spawn(spec, position, &self.grid)
    }

    pub fn move_entity(&mut self, id: EntityId, to: Position) -> Result<(), RegistryError> {
        self.entities.move_entity(id, to, &self.grid)
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.entities.first_of_kind(EntityKind::Player).map(|p| p.id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.first_of_kind(EntityKind::Player)
    }

    /// Number of projectiles currently in flight.
    pub fn projectiles_in_flight(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Projectile)
            .count()
    }

    /// True while combat mode is waiting on the player with nothing in flight;
    /// idle ticks do not advance the world then.
    pub fn idle_suspended(&self) -> bool {
        self.turn.mode == GameMode::Combat && self.projectiles_in_flight() == 0
    }

    pub fn is_over(&self) -> bool {
        self.turn.game_over.is_some()
    }
}
