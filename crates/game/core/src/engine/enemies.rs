//! Real-time entity decisions for `ResolvingEnemyActions`.

use crate::combat::resolve;
use crate::engine::pathing::{next_step, retreat_step};
use crate::engine::projectiles::launch_projectiles;
use crate::engine::{EnemyAction, EnemyActionKind};
use crate::env::{GameEnv, compute_seed};
use crate::state::{Behavior, Direction, EntityId, GameState, Position, StatusEffectKind};

/// Roll context for a confused step, kept clear of ability slot indices.
const CONFUSED_STEP_CONTEXT: u32 = u32::MAX;

/// Gives every real-time entity whose clock has elapsed exactly one action,
/// in ascending id order. Stops early once the player is gone.
pub(crate) fn resolve_enemy_actions(
    state: &mut GameState,
    env: &GameEnv<'_>,
    actions: &mut Vec<EnemyAction>,
) {
    let now = state.now();
    let actors: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|e| e.kind.acts_in_real_time())
        .map(|e| e.id)
        .collect();

    for id in actors {
        let Ok(entity) = state.entities.get_mut(id) else {
            continue;
        };
        let percent = entity.interval_percent(now, env.config);
        if !entity.clock.try_consume(percent, env.config.quantum()) {
            continue;
        }

        let kind = act(state, env, id);
        actions.push(EnemyAction {
            actor: id,
            at: now,
            kind,
        });

        if state.player_id().is_none() {
            break;
        }
    }
}

fn act(state: &mut GameState, env: &GameEnv<'_>, id: EntityId) -> EnemyActionKind {
    let Some(player) = state.player() else {
        return EnemyActionKind::Idle;
    };
    let (player_id, target) = (player.id, player.position);
    let now = state.now();

    let Ok(entity) = state.entities.get_mut(id) else {
        return EnemyActionKind::Idle;
    };
    for slot in entity.abilities.iter_mut() {
        slot.cooldown_remaining = slot.cooldown_remaining.saturating_sub(1);
    }
    let origin = entity.position;
    let behavior = entity.behavior;
    let distance = origin.chebyshev(target);

    if entity.status.has(StatusEffectKind::Confused, now) {
        return stumble(state, env, id, origin);
    }

    if behavior == Behavior::Stationary || distance > env.config.sight_radius {
        return EnemyActionKind::Idle;
    }

    if let Behavior::Ranged { retreat_distance } = behavior {
        if distance <= retreat_distance {
            if let Some(to) = retreat_step(state, origin, target) {
                if state.move_entity(id, to).is_ok() {
                    return EnemyActionKind::Retreated { from: origin, to };
                }
            }
        }
    }

    if let Some(kind) = try_ability(state, env, id, origin, target) {
        return kind;
    }

    if distance <= 1 {
        return match resolve(state, env.config, id, player_id) {
            Ok(outcome) => EnemyActionKind::Attacked(outcome),
            Err(_) => EnemyActionKind::Idle,
        };
    }

    match next_step(state, origin, target, env.config.sight_radius) {
        Some(to) if state.move_entity(id, to).is_ok() => EnemyActionKind::Moved { from: origin, to },
        _ => EnemyActionKind::Idle,
    }
}

/// Fires the first ready ability whose range and chance roll allow it.
fn try_ability(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    origin: Position,
    target: Position,
) -> Option<EnemyActionKind> {
    let now = state.now();
    let (seed, tick) = (state.seed, state.turn.tick_count);
    let entity = state.entities.get(id).ok()?;
    let attack = entity.effective_attack(now);
    let distance = origin.chebyshev(target);
    let aim = Direction::toward(origin, target)?;
    let aligned = origin.is_aligned_with(target);

    let (slot, ability) = entity.abilities.iter().enumerate().find_map(|(index, slot)| {
        let ability = slot.ability;
        let ready = slot.cooldown_remaining == 0 && distance <= ability.trigger_range;
        let lined_up = ability.pattern != crate::state::ProjectilePattern::Aimed || aligned;
        let roll = compute_seed(seed, tick, id.0, index as u32);
        (ready && lined_up && env.rng.chance(roll, ability.chance_percent))
            .then_some((index, ability))
    })?;

    let projectiles =
        launch_projectiles(state, id, origin, ability.projectile_spec(attack), aim).ok()?;
    if let Ok(entity) = state.entities.get_mut(id) {
        if let Some(slot) = entity.abilities.get_mut(slot) {
            slot.cooldown_remaining = ability.cooldown;
        }
    }
    Some(EnemyActionKind::AbilityUsed { slot, projectiles })
}

/// Steps in a random direction, striking any combatant found there.
fn stumble(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    origin: Position,
) -> EnemyActionKind {
    let roll = compute_seed(state.seed, state.turn.tick_count, id.0, CONFUSED_STEP_CONTEXT);
    let index = env.rng.next_u32(roll) as usize % Direction::ALL.len();
    let to = origin.step(Direction::ALL[index]);

    let victim = state
        .entities
        .occupant(to)
        .filter(|&other| state.entities.get(other).is_ok_and(|e| e.is_combatant()));
    if let Some(victim) = victim {
        return match resolve(state, env.config, id, victim) {
            Ok(outcome) => EnemyActionKind::Attacked(outcome),
            Err(_) => EnemyActionKind::Idle,
        };
    }
    match state.move_entity(id, to) {
        Ok(()) => EnemyActionKind::Moved { from: origin, to },
        Err(_) => EnemyActionKind::Idle,
    }
}
