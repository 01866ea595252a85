//! Live entity storage with occupancy tracking.
//!
//! Entities are keyed by a monotonically allocated [`EntityId`] that is never
//! reused, so a stale id always resolves to [`RegistryError::NotFound`].
//! Iteration follows ascending id order, which is the deterministic processing
//! order used by the scheduler.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::env::WorldGrid;
use crate::state::{
    ActionClock, Entity, EntityId, EntityKind, EntitySpec, EntityView, Position, ProjectileState,
    RegistryError, ResourceMeter, StatusEffects, Tick,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    next_id: u32,
    entities: BTreeMap<EntityId, Entity>,
    /// Tile held by each movement-blocking entity.
    occupancy: BTreeMap<Position, EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new entity at `position`.
    ///
    /// Blocking entities need a walkable, unoccupied tile. Projectiles only need
    /// an in-bounds tile since they are launched from their source's tile.
    pub fn spawn(
        &mut self,
        spec: EntitySpec,
        position: Position,
        grid: &WorldGrid,
    ) -> Result<EntityId, RegistryError> {
        let flags = spec.kind.default_flags();
        if spec.stats.max_health == 0 {
            return Err(RegistryError::Lifeless);
        }
        if !grid.contains(position) {
            return Err(RegistryError::OutOfBounds(position));
        }
        if flags.contains(crate::state::EntityFlags::BLOCKS_MOVEMENT) {
            self.ensure_vacant(position, grid, None)?;
        }

        let id = self.allocate_id()?;
        let clock = match spec.kind {
            EntityKind::Player => ActionClock::turn_bound(),
            kind if kind.acts_in_real_time() => {
                ActionClock::real_time(spec.stats.action_interval).unwrap_or(ActionClock::Inert)
            }
            _ => ActionClock::Inert,
        };

        let entity = Entity {
            id,
            kind: spec.kind,
            flags,
            position,
            health: ResourceMeter::full(spec.stats.max_health),
            stats: spec.stats,
            status: StatusEffects::empty(),
            clock,
            behavior: spec.behavior,
            abilities: spec.abilities,
            on_hit: spec.on_hit,
            projectile: None,
            template_id: spec.template_id,
        };

        if entity.blocks_movement() {
            self.occupancy.insert(position, id);
        }
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Spawns a projectile entity carrying `state`.
    pub fn spawn_projectile(
        &mut self,
        spec: EntitySpec,
        state: ProjectileState,
        grid: &WorldGrid,
    ) -> Result<EntityId, RegistryError> {
        let id = self.spawn(spec, state.sub_position.tile(), grid)?;
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.projectile = Some(state);
        }
        Ok(id)
    }

    /// Removes an entity. Despawning an absent id is a no-op returning `None`.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        if self.occupancy.get(&entity.position) == Some(&id) {
            self.occupancy.remove(&entity.position);
        }
        Some(entity)
    }

    /// Moves an entity to `to`, leaving the registry untouched on failure.
    pub fn move_entity(
        &mut self,
        id: EntityId,
        to: Position,
        grid: &WorldGrid,
    ) -> Result<(), RegistryError> {
        let entity = self.entities.get(&id).ok_or(RegistryError::NotFound(id))?;
        let from = entity.position;
        let blocks = entity.blocks_movement();

        if !grid.contains(to) {
            return Err(RegistryError::OutOfBounds(to));
        }
        if blocks {
            self.ensure_vacant(to, grid, Some(id))?;
        } else if !grid.is_passable(to) {
            return Err(RegistryError::Blocked {
                position: to,
                occupant: None,
            });
        }

        if blocks {
            self.occupancy.remove(&from);
            self.occupancy.insert(to, id);
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = to;
        }
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Result<&Entity, RegistryError> {
        self.entities.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Mutable access for resolvers. Position changes must go through
    /// [`Self::move_entity`] so occupancy stays consistent.
    pub(crate) fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity, RegistryError> {
        self.entities
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn view(
        &self,
        id: EntityId,
        now: Tick,
        config: &GameConfig,
    ) -> Result<EntityView, RegistryError> {
        self.get(id).map(|entity| entity.view(now, config))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Ids of every live entity of `kind`, in ascending order.
    ///
    /// The ids are collected up front, so the sequence is unaffected by spawns
    /// or despawns made while it is being consumed.
    pub fn all_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + use<> {
        self.entities
            .values()
            .filter(|entity| entity.kind == kind)
            .map(|entity| entity.id)
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// First live entity of `kind` (lowest id).
    pub fn first_of_kind(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.values().find(|entity| entity.kind == kind)
    }

    /// Blocking entity standing on `position`, if any.
    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.occupancy.get(&position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn ensure_vacant(
        &self,
        position: Position,
        grid: &WorldGrid,
        mover: Option<EntityId>,
    ) -> Result<(), RegistryError> {
        if !grid.is_passable(position) {
            return Err(RegistryError::Blocked {
                position,
                occupant: None,
            });
        }
        match self.occupant(position) {
            Some(occupant) if Some(occupant) != mover => Err(RegistryError::Blocked {
                position,
                occupant: Some(occupant),
            }),
            _ => Ok(()),
        }
    }

    /// Leaves room for exactly `remaining` more ids.
    #[cfg(test)]
    pub(crate) fn reserve_last_ids(&mut self, remaining: u32) {
        self.next_id = u32::MAX - remaining;
    }

    fn allocate_id(&mut self) -> Result<EntityId, RegistryError> {
        let id = EntityId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::IdOverflow)?;
        Ok(id)
    }
}
