//! Projectile launch and per-quantum motion.
//!
//! Projectiles move in fixed point ([`SubPosition`]) so that after `k` ticks a
//! projectile sits exactly at `start + velocity * quantum * k`. Collisions are
//! tested against every tile crossed during the quantum, using the blocking
//! occupancy captured when the tick started.

use std::collections::BTreeMap;

use crate::combat::resolve;
use crate::config::GameConfig;
use crate::engine::{ProjectileEvent, ProjectileEventKind};
use crate::state::{
    Direction, EntityId, EntityKind, EntitySpec, GameState, Position, ProjectileSpec,
    ProjectileState, RegistryError, StatBlock, SubPosition, Velocity,
};

/// Spawns the projectiles of `spec` at `origin`, credited to `source`.
///
/// `aim` selects the direction of an aimed pattern; the other patterns use
/// their fixed direction sets. Either every projectile of the pattern spawns
/// or none does.
pub fn launch_projectiles(
    state: &mut GameState,
    source: EntityId,
    origin: Position,
    spec: ProjectileSpec,
    aim: Direction,
) -> Result<Vec<EntityId>, RegistryError> {
    if spec.speed <= 0 {
        return Err(RegistryError::StalledProjectile(spec.speed));
    }
    let template = EntitySpec::new(
        EntityKind::Projectile,
        StatBlock::new(spec.power, 0, 1, 0),
    );

    let directions = spec.pattern.directions(aim);
    let mut launched = Vec::with_capacity(directions.len());
    for direction in directions.iter() {
        let motion = ProjectileState {
            source,
            velocity: Velocity::toward(*direction, spec.speed),
            sub_position: SubPosition::center_of(origin),
            remaining_range: spec.range,
        };
        match state
            .entities
            .spawn_projectile(template.clone(), motion, &state.grid)
        {
            Ok(id) => launched.push(id),
            Err(error) => {
                for id in launched {
                    state.entities.despawn(id);
                }
                return Err(error);
            }
        }
    }
    Ok(launched)
}

/// Advances every projectile by one quantum, in ascending id order.
pub(crate) fn advance_projectiles(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut Vec<ProjectileEvent>,
) {
    let occupancy: BTreeMap<Position, EntityId> = state
        .entities
        .iter()
        .filter(|e| e.blocks_movement())
        .map(|e| (e.position, e.id))
        .collect();
    let quantum = config.quantum();

    for id in state.entities.all_of_kind(EntityKind::Projectile) {
        let Ok(entity) = state.entities.get(id) else {
            continue;
        };
        let Some(motion) = entity.projectile else {
            state.entities.despawn(id);
            continue;
        };

        match step(state, &occupancy, motion, quantum) {
            Flight::Continue(motion) => {
                let tile = motion.sub_position.tile();
                if let Ok(entity) = state.entities.get_mut(id) {
                    entity.position = tile;
                    entity.projectile = Some(motion);
                }
                if motion.remaining_range == 0 {
                    state.entities.despawn(id);
                    events.push(ProjectileEvent {
                        projectile: id,
                        at: tile,
                        kind: ProjectileEventKind::RangeExhausted,
                    });
                }
            }
            Flight::Stop { at, reason } => {
                let kind = match reason {
                    StopReason::Target(target) => strike(state, config, id, target),
                    StopReason::Wall => ProjectileEventKind::HitWall,
                    StopReason::OutOfBounds => ProjectileEventKind::OutOfBounds,
                    StopReason::RangeExhausted => ProjectileEventKind::RangeExhausted,
                };
                state.entities.despawn(id);
                events.push(ProjectileEvent {
                    projectile: id,
                    at,
                    kind,
                });
            }
        }
    }
}

enum Flight {
    Continue(ProjectileState),
    Stop { at: Position, reason: StopReason },
}

enum StopReason {
    Target(EntityId),
    Wall,
    OutOfBounds,
    RangeExhausted,
}

/// Walks the tiles crossed during one quantum and reports the first stop.
fn step(
    state: &GameState,
    occupancy: &BTreeMap<Position, EntityId>,
    motion: ProjectileState,
    quantum: u64,
) -> Flight {
    let from = motion.sub_position.tile();
    let destination = motion.sub_position.advanced(motion.velocity, quantum);
    let to = destination.tile();
    let crossed = from.chebyshev(to);

    let Some(direction) = Direction::toward(from, to) else {
        return Flight::Continue(ProjectileState {
            sub_position: destination,
            ..motion
        });
    };

    let mut remaining_range = motion.remaining_range;
    let mut tile = from;
    for _ in 0..crossed {
        if remaining_range == 0 {
            return Flight::Stop {
                at: tile,
                reason: StopReason::RangeExhausted,
            };
        }
        tile = tile.step(direction);
        remaining_range -= 1;

        if !state.grid.contains(tile) {
            return Flight::Stop {
                at: tile,
                reason: StopReason::OutOfBounds,
            };
        }
        if !state.grid.is_passable(tile) {
            return Flight::Stop {
                at: tile,
                reason: StopReason::Wall,
            };
        }
        if let Some(&occupant) = occupancy.get(&tile) {
            if occupant != motion.source {
                return Flight::Stop {
                    at: tile,
                    reason: StopReason::Target(occupant),
                };
            }
        }
    }

    Flight::Continue(ProjectileState {
        sub_position: destination,
        remaining_range,
        ..motion
    })
}

fn strike(
    state: &mut GameState,
    config: &GameConfig,
    projectile: EntityId,
    target: EntityId,
) -> ProjectileEventKind {
    match state.entities.get(target) {
        Err(_) => ProjectileEventKind::Fizzled,
        Ok(entity) if !entity.is_combatant() => ProjectileEventKind::Absorbed(target),
        Ok(_) => match resolve(state, config, projectile, target) {
            Ok(outcome) => ProjectileEventKind::Impact(outcome),
            Err(_) => ProjectileEventKind::Fizzled,
        },
    }
}
