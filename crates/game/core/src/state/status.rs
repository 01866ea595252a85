//! Status effect system for entities.
//!
//! Status effects are temporary modifiers applied by consumables and strikes.
//!
//! # Tick-based Duration
//!
//! Effects store `expires_at: Tick` on the simulated game clock. Multiple
//! quanta can pass between two observations, so an effect is active while
//! `current_tick < expires_at` and is pruned on the first `RealTimeTick` at or
//! after its expiry.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::Tick;

/// Active status effects on an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with expiration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Flat stat delta carried by buffs; unused by percentage-based effects.
    pub magnitude: i32,
    /// Tick at which this effect expires.
    pub expires_at: Tick,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusEffectKind {
    /// Attack raised by `magnitude` (strength potion).
    Strengthened,

    /// Defense raised by `magnitude` (defense potion).
    Fortified,

    /// Defense cut and action interval stretched (ice bomb).
    Chilled,

    /// Wanders in a random direction and strikes whatever it bumps into
    /// (confusion scroll). Only steers real-time entities.
    Confused,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active at the given tick.
    pub fn has(&self, kind: StatusEffectKind, current_tick: Tick) -> bool {
        self.get(kind, current_tick).is_some()
    }

    /// Returns the active effect of `kind`, if any.
    pub fn get(&self, kind: StatusEffectKind, current_tick: Tick) -> Option<&StatusEffect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.expires_at > current_tick)
    }

    /// Adds a status effect.
    ///
    /// If the effect already exists, extends to the later expiration time and
    /// keeps the stronger magnitude. Returns false when the set is full.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.expires_at = existing.expires_at.max(effect.expires_at);
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes all expired status effects at the current tick, returning how
    /// many were dropped.
    pub fn remove_expired(&mut self, current_tick: Tick) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.expires_at > current_tick);
        before - self.effects.len()
    }

    /// Magnitude of the active effect of `kind`, zero when absent.
    pub fn magnitude(&self, kind: StatusEffectKind, current_tick: Tick) -> i32 {
        self.get(kind, current_tick).map_or(0, |e| e.magnitude)
    }

    /// Returns an iterator over all active effects at the given tick.
    pub fn active_at(&self, current_tick: Tick) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.effects
            .iter()
            .filter(move |e| e.expires_at > current_tick)
    }

    /// Returns true if no status effects exist (including expired).
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
