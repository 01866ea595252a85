use crate::combat::{CombatError, calculate_damage};
use crate::config::GameConfig;
use crate::state::{
    Entity, EntityId, EntityKind, GameState, StatusEffect, StatusEffectKind, StatusInfliction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub defender_kind: EntityKind,
    /// `max(0, attack - defense)`, reported even when it exceeds the
    /// defender's remaining health.
    pub damage_dealt: u32,
    pub status_applied: Option<StatusEffectKind>,
    /// The defender reached zero health and has already been despawned.
    pub defender_died: bool,
}

/// Resolves one strike of `attacker` against `defender`.
///
/// Effective stats include active buffs and the chill defense cut at the
/// current clock. Projectiles strike with the power baked into their own stat
/// block. A defender brought to zero health is removed from the registry
/// before this returns.
pub fn resolve(
    state: &mut GameState,
    config: &GameConfig,
    attacker: EntityId,
    defender: EntityId,
) -> Result<CombatOutcome, CombatError> {
    let now = state.now();

    let (attack, inflicts) = {
        let source = state
            .entities
            .get(attacker)
            .map_err(|_| CombatError::NotFound(attacker))?;
        (source.effective_attack(now), source.on_hit)
    };

    let defense = combatant(state, defender)?.effective_defense(now, config);
    land(
        state,
        attacker,
        defender,
        calculate_damage(attack, defense),
        inflicts,
    )
}

/// Deals a fixed `damage` to `defender`, ignoring every stat on both sides.
///
/// Used by effects whose damage is set by the item rather than by the user's
/// attack. Death handling matches [`resolve`].
pub fn inflict(
    state: &mut GameState,
    attacker: EntityId,
    defender: EntityId,
    damage: u32,
) -> Result<CombatOutcome, CombatError> {
    combatant(state, defender)?;
    land(state, attacker, defender, damage, None)
}

fn combatant(state: &GameState, id: EntityId) -> Result<&Entity, CombatError> {
    let entity = state
        .entities
        .get(id)
        .map_err(|_| CombatError::NotFound(id))?;
    if !entity.is_combatant() {
        return Err(CombatError::NotCombatant(id));
    }
    Ok(entity)
}

fn land(
    state: &mut GameState,
    attacker: EntityId,
    defender: EntityId,
    damage: u32,
    inflicts: Option<StatusInfliction>,
) -> Result<CombatOutcome, CombatError> {
    let now = state.now();
    let target = state
        .entities
        .get_mut(defender)
        .map_err(|_| CombatError::NotFound(defender))?;
    target.health.drain(damage);

    let mut status_applied = None;
    if damage > 0 {
        if let Some(infliction) = inflicts {
            let applied = target.status.add(StatusEffect {
                kind: infliction.kind,
                magnitude: infliction.magnitude,
                expires_at: now + infliction.duration,
            });
            if applied {
                status_applied = Some(infliction.kind);
            }
        }
    }

    let defender_kind = target.kind;
    let defender_died = !target.is_alive();
    if defender_died {
        state.entities.despawn(defender);
    }

    Ok(CombatOutcome {
        attacker,
        defender,
        defender_kind,
        damage_dealt: damage,
        status_applied,
        defender_died,
    })
}
