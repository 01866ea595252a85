//! Read-only view handed to renderers.
//!
//! A [`Snapshot`] owns copies of everything it exposes (the tile array is
//! shared through an `Arc` since it never changes), so holding one cannot
//! mutate or observe later changes to the live [`GameState`].

use std::sync::Arc;

use crate::config::GameConfig;
use crate::env::{MapDimensions, StaticTile};
use crate::state::{
    ConsumableStack, EntityId, EntityView, GameMode, GameOver, GameState, Position,
    SchedulerPhase, Tick,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub dimensions: MapDimensions,
    /// Row-major tiles.
    pub tiles: Arc<[StaticTile]>,
    /// Live entities in ascending id order.
    pub entities: Vec<EntityView>,
    /// The player's inventory, for the consumables panel.
    pub consumables: Vec<ConsumableStack>,
    pub player: Option<EntityId>,
    pub clock: Tick,
    pub tick_count: u64,
    pub nonce: u64,
    pub phase: SchedulerPhase,
    pub mode: GameMode,
    pub game_over: Option<GameOver>,
}

impl Snapshot {
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let now = state.now();
        Self {
            dimensions: state.grid.dimensions(),
            tiles: state.grid.tiles(),
            entities: state.entities.iter().map(|e| e.view(now, config)).collect(),
            consumables: state.inventory.stacks().to_vec(),
            player: state.player_id(),
            clock: now,
            tick_count: state.turn.tick_count,
            nonce: state.turn.nonce,
            phase: state.turn.phase,
            mode: state.turn.mode,
            game_over: state.turn.game_over,
        }
    }

    pub fn tile(&self, position: Position) -> Option<StaticTile> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.tiles.get(index).copied()
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Entities standing on `position` (a blocker plus any projectiles).
    pub fn entities_at(&self, position: Position) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(move |e| e.position == position)
    }

    pub fn player_view(&self) -> Option<&EntityView> {
        self.player.and_then(|id| self.entity(id))
    }
}
