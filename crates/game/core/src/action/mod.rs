//! Player input accepted by the scheduler.

use crate::combat::CombatOutcome;
use crate::consumable::{ConsumableKind, EffectOutcome, Target};
use crate::state::{Direction, Position};

/// One discrete player decision, consumed in `AwaitingPlayerInput`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlayerAction {
    Move(Direction),
    Attack(Direction),
    UseConsumable {
        kind: ConsumableKind,
        target: Target,
    },
    Wait,
}

impl PlayerAction {
    pub fn use_consumable(kind: ConsumableKind, target: Target) -> Self {
        PlayerAction::UseConsumable { kind, target }
    }
}

/// What the player's action did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerOutcome {
    Moved { from: Position, to: Position },
    Attacked(CombatOutcome),
    Used {
        kind: ConsumableKind,
        outcome: EffectOutcome,
    },
    Waited,
}
