use crate::combat::CombatOutcome;
use crate::state::{Direction, EntityId, Position, ProjectileSpec, StatusEffectKind, Tick};

/// Every consumable the player can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumableKind {
    StrengthPotion,
    DefensePotion,
    HealingPotion,
    IceBomb,
    ArrowScroll,
    ShockwaveScroll,
    CrossBlastScroll,
    DiagonalBlastScroll,
    ConfusionScroll,
    FireballScroll,
    LightningScroll,
}

/// What a consumable does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDescriptor {
    /// Timed stat delta on the user.
    Buff {
        status: StatusEffectKind,
        magnitude: i32,
        /// Simulated milliseconds.
        duration: u64,
    },
    /// Restores up to `amount` health to the user.
    Heal { amount: u32 },
    /// Applies `status` to every other combatant within `radius` of the target tile.
    AreaStatus {
        status: StatusEffectKind,
        magnitude: i32,
        duration: u64,
        radius: u32,
        /// Furthest tile from the user that may be targeted.
        throw_range: u32,
    },
    /// Launches projectiles from the user's tile.
    Projectile(ProjectileSpec),
    /// Deals `amount` to every combatant within `radius` of the target tile,
    /// the user included.
    AreaDamage {
        amount: u32,
        radius: u32,
        throw_range: u32,
    },
    /// Deals `amount` to the nearest combatant other than the user within
    /// `range`.
    Bolt { amount: u32, range: u32 },
}

/// Where a consumable is aimed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    #[default]
    User,
    Position(Position),
    Direction(Direction),
}

/// Result of a successful use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    Buffed {
        status: StatusEffectKind,
        magnitude: i32,
        expires_at: Tick,
    },
    Healed {
        amount: u32,
    },
    AreaApplied {
        status: StatusEffectKind,
        center: Position,
        affected: Vec<EntityId>,
    },
    ProjectilesLaunched {
        projectiles: Vec<EntityId>,
    },
    /// Hits in ascending defender id order.
    Blasted {
        center: Position,
        hits: Vec<CombatOutcome>,
    },
    Struck(CombatOutcome),
}

impl EffectOutcome {
    /// Damage dealt directly by the effect. Projectile damage is reported
    /// later, on impact.
    pub fn combat_outcomes(&self) -> &[CombatOutcome] {
        match self {
            EffectOutcome::Blasted { hits, .. } => hits,
            EffectOutcome::Struck(outcome) => std::slice::from_ref(outcome),
            _ => &[],
        }
    }
}
