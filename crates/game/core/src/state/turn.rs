use crate::state::Tick;

/// Scheduler state machine positions.
///
/// The committed state only ever rests in [`SchedulerPhase::AwaitingPlayerInput`];
/// the other phases are entered and left within a single engine call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SchedulerPhase {
    #[default]
    AwaitingPlayerInput,
    ResolvingPlayerTurn,
    RealTimeTick,
    ResolvingEnemyActions,
}

impl SchedulerPhase {
    /// Successor in the cycle. `ResolvingEnemyActions` either starts another
    /// quantum or rests, which the engine decides.
    pub fn next(self) -> Self {
        match self {
            SchedulerPhase::AwaitingPlayerInput => SchedulerPhase::ResolvingPlayerTurn,
            SchedulerPhase::ResolvingPlayerTurn => SchedulerPhase::RealTimeTick,
            SchedulerPhase::RealTimeTick => SchedulerPhase::ResolvingEnemyActions,
            SchedulerPhase::ResolvingEnemyActions => SchedulerPhase::AwaitingPlayerInput,
        }
    }
}

/// Pacing regime chosen from the player's surroundings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// No hostile nearby: the world keeps running between player actions.
    #[default]
    Exploration,
    /// A hostile is engaged: time only advances on player turns.
    Combat,
}

/// Terminal outcomes reported upward by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameOver {
    PlayerDied,
    BossDefeated,
}

/// Scheduler bookkeeping owned by the game state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Simulated time elapsed since the start of the game.
    pub clock: Tick,
    /// Number of `RealTimeTick`s run so far.
    pub tick_count: u64,
    /// Completed scheduler cycles (player turns plus idle ticks).
    pub nonce: u64,
    pub phase: SchedulerPhase,
    pub mode: GameMode,
    pub game_over: Option<GameOver>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
