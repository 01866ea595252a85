//! Consumable effect table.

use std::collections::BTreeMap;

use crate::consumable::{ConsumableKind, EffectDescriptor};
use crate::state::{ProjectilePattern, ProjectileSpec, StatusEffectKind};

/// Effect descriptor per consumable kind.
///
/// The defaults reproduce the stock item table; content files may replace any
/// entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConsumableCatalog {
    effects: BTreeMap<ConsumableKind, EffectDescriptor>,
}

impl ConsumableCatalog {
    pub const STRENGTH_BONUS: i32 = 3;
    pub const STRENGTH_DURATION: u64 = 5_000;
    pub const DEFENSE_BONUS: i32 = 2;
    pub const DEFENSE_DURATION: u64 = 7_000;
    pub const HEAL_AMOUNT: u32 = 4;
    pub const ICE_BOMB_RADIUS: u32 = 3;
    pub const ICE_BOMB_DURATION: u64 = 5_000;
    pub const ICE_BOMB_THROW_RANGE: u32 = 8;
    /// One tile per 100 ms quantum.
    pub const PROJECTILE_SPEED: i32 = 10;
    pub const CONFUSION_DURATION: u64 = 10_000;
    pub const CONFUSION_THROW_RANGE: u32 = 8;
    pub const FIREBALL_DAMAGE: u32 = 12;
    pub const FIREBALL_RADIUS: u32 = 3;
    pub const FIREBALL_THROW_RANGE: u32 = 8;
    pub const LIGHTNING_DAMAGE: u32 = 20;
    pub const LIGHTNING_RANGE: u32 = 5;

    /// Catalog without any entries.
    pub fn empty() -> Self {
        Self {
            effects: BTreeMap::new(),
        }
    }

    pub fn get(&self, kind: ConsumableKind) -> Option<&EffectDescriptor> {
        self.effects.get(&kind)
    }

    pub fn insert(&mut self, kind: ConsumableKind, effect: EffectDescriptor) {
        self.effects.insert(kind, effect);
    }

    pub fn with(mut self, kind: ConsumableKind, effect: EffectDescriptor) -> Self {
        self.insert(kind, effect);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConsumableKind, &EffectDescriptor)> {
        self.effects.iter().map(|(kind, effect)| (*kind, effect))
    }

    fn blast(power: i32, range: u32, pattern: ProjectilePattern) -> EffectDescriptor {
        EffectDescriptor::Projectile(ProjectileSpec {
            power,
            speed: Self::PROJECTILE_SPEED,
            range,
            pattern,
        })
    }
}

impl Default for ConsumableCatalog {
    fn default() -> Self {
        use ConsumableKind::*;

        Self::empty()
            .with(
                StrengthPotion,
                EffectDescriptor::Buff {
                    status: StatusEffectKind::Strengthened,
                    magnitude: Self::STRENGTH_BONUS,
                    duration: Self::STRENGTH_DURATION,
                },
            )
            .with(
                DefensePotion,
                EffectDescriptor::Buff {
                    status: StatusEffectKind::Fortified,
                    magnitude: Self::DEFENSE_BONUS,
                    duration: Self::DEFENSE_DURATION,
                },
            )
            .with(
                HealingPotion,
                EffectDescriptor::Heal {
                    amount: Self::HEAL_AMOUNT,
                },
            )
            .with(
                IceBomb,
                EffectDescriptor::AreaStatus {
                    status: StatusEffectKind::Chilled,
                    magnitude: 0,
                    duration: Self::ICE_BOMB_DURATION,
                    radius: Self::ICE_BOMB_RADIUS,
                    throw_range: Self::ICE_BOMB_THROW_RANGE,
                },
            )
            .with(ArrowScroll, Self::blast(8, 10, ProjectilePattern::Aimed))
            .with(ShockwaveScroll, Self::blast(10, 4, ProjectilePattern::Ring))
            .with(CrossBlastScroll, Self::blast(12, 5, ProjectilePattern::Cross))
            .with(
                DiagonalBlastScroll,
                Self::blast(12, 5, ProjectilePattern::Diagonal),
            )
            .with(
                ConfusionScroll,
                EffectDescriptor::AreaStatus {
                    status: StatusEffectKind::Confused,
                    magnitude: 0,
                    duration: Self::CONFUSION_DURATION,
                    radius: 0,
                    throw_range: Self::CONFUSION_THROW_RANGE,
                },
            )
            .with(
                FireballScroll,
                EffectDescriptor::AreaDamage {
                    amount: Self::FIREBALL_DAMAGE,
                    radius: Self::FIREBALL_RADIUS,
                    throw_range: Self::FIREBALL_THROW_RANGE,
                },
            )
            .with(
                LightningScroll,
                EffectDescriptor::Bolt {
                    amount: Self::LIGHTNING_DAMAGE,
                    range: Self::LIGHTNING_RANGE,
                },
            )
    }
}
