//! Breadth-first pursuit.

use std::collections::{BTreeMap, VecDeque};

use crate::state::{Direction, GameState, Position};

/// First step of a shortest 8-connected path from `from` to `to`.
///
/// The search stays inside the square of Chebyshev `radius` around `from` and
/// avoids blocking entities other than the one standing on `to`. Neighbours are
/// expanded in [`Direction::ALL`] order, so ties always break the same way.
/// Returns `None` when already adjacent or when no path exists.
pub fn next_step(state: &GameState, from: Position, to: Position, radius: u32) -> Option<Position> {
    if from.chebyshev(to) <= 1 {
        return None;
    }

    let mut parents: BTreeMap<Position, Position> = BTreeMap::new();
    let mut queue = VecDeque::from([from]);
    parents.insert(from, from);

    while let Some(current) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = current.step(direction);
            if parents.contains_key(&next) || from.chebyshev(next) > radius {
                continue;
            }
            if next != to && !state.is_walkable(next) {
                continue;
            }
            parents.insert(next, current);
            if next == to {
                return first_step(&parents, from, to);
            }
            queue.push_back(next);
        }
    }
    None
}

fn first_step(parents: &BTreeMap<Position, Position>, from: Position, to: Position) -> Option<Position> {
    let mut step = to;
    loop {
        let parent = *parents.get(&step)?;
        if parent == from {
            return Some(step);
        }
        step = parent;
    }
}

/// Walkable neighbour of `from` that maximises the distance to `threat`.
pub fn retreat_step(state: &GameState, from: Position, threat: Position) -> Option<Position> {
    let current = from.distance_squared(threat);
    Direction::ALL
        .into_iter()
        .map(|direction| from.step(direction))
        .filter(|next| state.is_walkable(*next))
        .filter(|next| next.distance_squared(threat) > current)
        .max_by_key(|next| (next.distance_squared(threat), std::cmp::Reverse(*next)))
}
