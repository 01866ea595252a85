//! Shared entity shape.
//!
//! Player, enemies, bosses, NPCs and projectiles are one struct told apart by
//! [`EntityKind`], [`EntityFlags`] and their stat/ability data. Bosses differ
//! from standard enemies only in numbers and ability lists.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::combat::scale_attack;
use crate::config::GameConfig;
use crate::state::{
    ActionClock, EntityId, Position, RegistryError, ResourceMeter, StatusEffectKind, StatusEffects,
    Tick,
};

/// Tagged entity variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Npc,
    Projectile,
}

impl EntityKind {
    /// Capability flags every entity of this kind starts with.
    pub fn default_flags(self) -> EntityFlags {
        match self {
            EntityKind::Player => EntityFlags::BLOCKS_MOVEMENT | EntityFlags::COMBATANT,
            EntityKind::Enemy | EntityKind::Boss => {
                EntityFlags::BLOCKS_MOVEMENT | EntityFlags::COMBATANT | EntityFlags::HOSTILE
            }
            EntityKind::Npc => EntityFlags::BLOCKS_MOVEMENT,
            EntityKind::Projectile => EntityFlags::empty(),
        }
    }

    /// Kinds whose action cadence is driven by the real-time clock.
    pub fn acts_in_real_time(self) -> bool {
        matches!(self, EntityKind::Enemy | EntityKind::Boss)
    }
}

bitflags! {
    /// Capabilities consulted by movement, combat and area effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        /// Occupies its tile exclusively; projectiles stop on it.
        const BLOCKS_MOVEMENT = 1 << 0;
        /// Can be damaged through the combat resolver.
        const COMBATANT       = 1 << 1;
        /// Pursues and attacks the player.
        const HOSTILE         = 1 << 2;
    }
}

/// Base combat numbers, as supplied by the content loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
    pub max_health: u32,
    /// Milliseconds between actions for real-time entities (ignored otherwise).
    pub action_interval: u64,
}

impl StatBlock {
    pub const fn new(attack: i32, defense: i32, max_health: u32, action_interval: u64) -> Self {
        Self {
            attack,
            defense,
            max_health,
            action_interval,
        }
    }

    /// Scales attack, defense and health by `percent` (interval untouched),
    /// saturating at the bounds of each field.
    pub fn scaled(self, percent: u32) -> Self {
        let signed = |value: i32| {
            let scaled = i64::from(value) * i64::from(percent) / 100;
            i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
        };
        let health = u64::from(self.max_health) * u64::from(percent) / 100;
        Self {
            attack: signed(self.attack),
            defense: signed(self.defense),
            max_health: u32::try_from(health.max(1)).unwrap_or(u32::MAX),
            action_interval: self.action_interval,
        }
    }
}

/// How a real-time entity chooses its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Chase and strike in melee; abilities fire when their roll succeeds.
    #[default]
    Melee,
    /// Keeps its distance: retreats when the player is this close, otherwise
    /// shoots when possible and closes in when not.
    Ranged { retreat_distance: u32 },
    /// Never moves or attacks.
    Stationary,
}

/// Spatial layout of the projectiles spawned by one use or ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProjectilePattern {
    /// One projectile toward the target.
    Aimed,
    /// Four projectiles along the axes.
    Cross,
    /// Four projectiles along the diagonals.
    Diagonal,
    /// Eight projectiles in every direction.
    Ring,
}

impl ProjectilePattern {
    /// Launch directions, with `aim` used by [`ProjectilePattern::Aimed`].
    pub fn directions(self, aim: crate::state::Direction) -> &'static [crate::state::Direction] {
        use crate::state::Direction;
        match self {
            ProjectilePattern::Aimed => match aim {
                Direction::North => &[Direction::North],
                Direction::South => &[Direction::South],
                Direction::East => &[Direction::East],
                Direction::West => &[Direction::West],
                Direction::NorthEast => &[Direction::NorthEast],
                Direction::NorthWest => &[Direction::NorthWest],
                Direction::SouthEast => &[Direction::SouthEast],
                Direction::SouthWest => &[Direction::SouthWest],
            },
            ProjectilePattern::Cross => &Direction::CARDINALS,
            ProjectilePattern::Diagonal => &Direction::DIAGONALS,
            ProjectilePattern::Ring => &Direction::ALL,
        }
    }
}

/// Launch parameters shared by consumables and ranged abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileSpec {
    /// Attack value the projectile strikes with.
    pub power: i32,
    /// Tiles per second along each moving axis.
    pub speed: i32,
    /// Tiles travelled before the projectile fizzles.
    pub range: u32,
    pub pattern: ProjectilePattern,
}

/// Status a strike applies to its defender on a damaging hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInfliction {
    pub kind: StatusEffectKind,
    pub magnitude: i32,
    /// Simulated milliseconds the status lasts.
    pub duration: u64,
}

/// Data-driven ranged ability consulted when a real-time entity acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    /// Maximum distance to the player at which the ability is considered.
    pub trigger_range: u32,
    /// Own actions to wait before the ability can fire again.
    pub cooldown: u8,
    /// Chance (0-100) that the ability fires when otherwise available.
    pub chance_percent: u8,
    /// Projectile power as a percentage of the user's effective attack.
    pub power_percent: u32,
    pub speed: i32,
    pub projectile_range: u32,
    pub pattern: ProjectilePattern,
}

impl Ability {
    /// Projectile launch parameters for a user with `attack`.
    pub fn projectile_spec(&self, attack: i32) -> ProjectileSpec {
        ProjectileSpec {
            power: scale_attack(attack, self.power_percent),
            speed: self.speed,
            range: self.projectile_range,
            pattern: self.pattern,
        }
    }
}

/// Ability together with its per-entity cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub ability: Ability,
    pub cooldown_remaining: u8,
}

pub type AbilitySlots = ArrayVec<AbilitySlot, { GameConfig::MAX_ABILITIES }>;

/// Number of sub-tile units per tile used for projectile motion.
pub const SUBTILES_PER_TILE: i64 = 1000;

/// Fixed-point position in sub-tile units (1/1000 tile).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubPosition {
    pub x: i64,
    pub y: i64,
}

impl SubPosition {
    /// Centre of the given tile.
    pub fn center_of(position: Position) -> Self {
        Self {
            x: i64::from(position.x) * SUBTILES_PER_TILE + SUBTILES_PER_TILE / 2,
            y: i64::from(position.y) * SUBTILES_PER_TILE + SUBTILES_PER_TILE / 2,
        }
    }

    /// Tile containing this point, saturating at the `i32` range.
    pub fn tile(self) -> Position {
        let axis = |value: i64| {
            let tile = value.div_euclid(SUBTILES_PER_TILE);
            i32::try_from(tile).unwrap_or(if tile < 0 { i32::MIN } else { i32::MAX })
        };
        Position::new(axis(self.x), axis(self.y))
    }

    /// Point reached after moving at `velocity` for `elapsed` milliseconds.
    /// Saturates instead of wrapping; such a point lies far outside any grid.
    pub fn advanced(self, velocity: Velocity, elapsed: u64) -> Self {
        let elapsed = i64::try_from(elapsed).unwrap_or(i64::MAX);
        Self {
            x: self.x.saturating_add(velocity.x.saturating_mul(elapsed)),
            y: self.y.saturating_add(velocity.y.saturating_mul(elapsed)),
        }
    }
}

/// Velocity in sub-tiles per millisecond (numerically equal to tiles per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub x: i64,
    pub y: i64,
}

impl Velocity {
    pub fn toward(direction: crate::state::Direction, speed: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: i64::from(dx) * i64::from(speed),
            y: i64::from(dy) * i64::from(speed),
        }
    }
}

/// Motion state carried by projectile entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileState {
    /// Entity credited with the damage.
    pub source: EntityId,
    pub velocity: Velocity,
    pub sub_position: SubPosition,
    /// Tiles the projectile may still cross.
    pub remaining_range: u32,
}

/// Parameters for [`EntityRegistry::spawn`](crate::state::EntityRegistry::spawn).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub stats: StatBlock,
    pub behavior: Behavior,
    pub abilities: AbilitySlots,
    pub on_hit: Option<StatusInfliction>,
    pub template_id: u16,
}

impl EntitySpec {
    pub fn new(kind: EntityKind, stats: StatBlock) -> Self {
        let behavior = match kind {
            EntityKind::Enemy | EntityKind::Boss => Behavior::Melee,
            _ => Behavior::Stationary,
        };
        Self {
            kind,
            stats,
            behavior,
            abilities: AbilitySlots::new(),
            on_hit: None,
            template_id: 0,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Appends an ability, failing once every slot is taken.
    pub fn with_ability(mut self, ability: Ability) -> Result<Self, RegistryError> {
        self.abilities
            .try_push(AbilitySlot {
                ability,
                cooldown_remaining: 0,
            })
            .map_err(|_| RegistryError::TooManyAbilities(GameConfig::MAX_ABILITIES + 1))?;
        Ok(self)
    }

    pub fn with_on_hit(mut self, on_hit: StatusInfliction) -> Self {
        self.on_hit = Some(on_hit);
        self
    }

    pub fn with_template(mut self, template_id: u16) -> Self {
        self.template_id = template_id;
        self
    }
}

/// A live entity owned by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub flags: EntityFlags,
    pub position: Position,
    pub health: ResourceMeter,
    pub stats: StatBlock,
    pub status: StatusEffects,
    pub clock: ActionClock,
    pub behavior: Behavior,
    pub abilities: AbilitySlots,
    pub on_hit: Option<StatusInfliction>,
    pub projectile: Option<ProjectileState>,
    pub template_id: u16,
}

impl Entity {
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn blocks_movement(&self) -> bool {
        self.flags.contains(EntityFlags::BLOCKS_MOVEMENT)
    }

    pub fn is_combatant(&self) -> bool {
        self.flags.contains(EntityFlags::COMBATANT)
    }

    pub fn is_hostile(&self) -> bool {
        self.flags.contains(EntityFlags::HOSTILE)
    }

    /// Attack including active buffs.
    pub fn effective_attack(&self, now: Tick) -> i32 {
        self.stats
            .attack
            .saturating_add(self.status.magnitude(StatusEffectKind::Strengthened, now))
    }

    /// Defense including buffs, reduced while chilled.
    pub fn effective_defense(&self, now: Tick, config: &GameConfig) -> i32 {
        let defense = self
            .stats
            .defense
            .saturating_add(self.status.magnitude(StatusEffectKind::Fortified, now));

        if self.status.has(StatusEffectKind::Chilled, now) && defense > 0 {
            let kept = 100 - i64::from(config.chill_defense_percent.min(100));
            (i64::from(defense) * kept / 100) as i32
        } else {
            defense
        }
    }

    /// Action interval stretch in percent (100 = unmodified).
    pub fn interval_percent(&self, now: Tick, config: &GameConfig) -> u32 {
        if self.status.has(StatusEffectKind::Chilled, now) {
            config.chill_interval_percent.max(100)
        } else {
            100
        }
    }

    /// Read-only view of this entity at `now`.
    pub fn view(&self, now: Tick, config: &GameConfig) -> EntityView {
        EntityView {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            attack: self.effective_attack(now),
            defense: self.effective_defense(now, config),
            statuses: self.status.active_at(now).map(|e| e.kind).collect(),
            template_id: self.template_id,
        }
    }
}

/// Immutable view of an entity handed to callers outside the resolvers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub health: ResourceMeter,
    pub attack: i32,
    pub defense: i32,
    pub statuses: ArrayVec<StatusEffectKind, { GameConfig::MAX_STATUS_EFFECTS }>,
    pub template_id: u16,
}
