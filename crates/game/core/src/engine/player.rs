//! `ResolvingPlayerTurn`: validate, then apply the player's action.

use crate::action::{PlayerAction, PlayerOutcome};
use crate::combat::resolve;
use crate::consumable::use_consumable;
use crate::engine::ActionError;
use crate::env::GameEnv;
use crate::state::GameState;

pub(crate) fn apply(
    state: &mut GameState,
    env: &GameEnv<'_>,
    action: PlayerAction,
) -> Result<PlayerOutcome, ActionError> {
    let player = state.player().ok_or(ActionError::NoPlayer)?;
    let (id, from) = (player.id, player.position);

    match action {
        PlayerAction::Move(direction) => {
            let to = from.step(direction);
            state.move_entity(id, to)?;
            Ok(PlayerOutcome::Moved { from, to })
        }
        PlayerAction::Attack(direction) => {
            let at = from.step(direction);
            let defender = state
                .entities
                .occupant(at)
                .ok_or(ActionError::NothingToAttack(at))?;
            let outcome = resolve(state, env.config, id, defender)?;
            Ok(PlayerOutcome::Attacked(outcome))
        }
        PlayerAction::UseConsumable { kind, target } => {
            let outcome = use_consumable(state, env, kind, id, target)?;
            Ok(PlayerOutcome::Used { kind, outcome })
        }
        PlayerAction::Wait => Ok(PlayerOutcome::Waited),
    }
}
