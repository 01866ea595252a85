//! Deterministic rules for a hybrid turn-based/real-time dungeon crawler.
//!
//! `game-core` owns the world grid, the entity registry, combat, consumables
//! and the scheduler that reconciles discrete player turns with real-time
//! enemy and projectile updates. It performs no I/O; all state mutation flows
//! through [`engine::GameEngine`], and renderers read a [`Snapshot`].
pub mod action;
pub mod combat;
pub mod config;
pub mod consumable;
pub mod engine;
pub mod env;
pub mod error;
pub mod snapshot;
pub mod state;

pub use action::{PlayerAction, PlayerOutcome};
pub use combat::{CombatError, CombatOutcome, inflict, resolve};
pub use config::GameConfig;
pub use consumable::{
    ConsumableError, ConsumableKind, EffectDescriptor, EffectOutcome, Target, use_consumable,
};
pub use engine::{
    ActionError, CycleReport, EnemyAction, EnemyActionKind, GameEngine, ProjectileEvent,
    ProjectileEventKind,
};
pub use env::{
    ActorTemplate, ConsumableCatalog, GameEnv, MapDimensions, OutOfBounds, PcgRng, RngOracle,
    StaticTile, TerrainKind, Tile, WorldGrid,
};
pub use error::{ErrorSeverity, GameError};
pub use snapshot::Snapshot;
pub use state::{
    Ability, Behavior, Direction, Entity, EntityId, EntityKind, EntityRegistry, EntitySpec,
    EntityView, GameMode, GameOver, GameState, Inventory, Position, ProjectilePattern,
    RegistryError, ResourceMeter, SchedulerPhase, StatBlock, StatusEffectKind, Tick,
};
