use crate::action::PlayerOutcome;
use crate::combat::CombatOutcome;
use crate::state::{EntityId, GameMode, GameOver, Position, Tick};

/// Everything that happened during one scheduler cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReport {
    /// `None` for idle ticks.
    pub player: Option<PlayerOutcome>,
    /// `RealTimeTick`s run in this cycle.
    pub ticks_run: u32,
    /// Simulated clock after the cycle.
    pub clock: Tick,
    pub projectiles: Vec<ProjectileEvent>,
    pub enemies: Vec<EnemyAction>,
    /// Status effects pruned because they expired.
    pub expired_statuses: usize,
    pub mode: GameMode,
    pub mode_changed: bool,
    pub game_over: Option<GameOver>,
}

impl CycleReport {
    /// Combat outcomes from every source, in resolution order within each source.
    pub fn combat_outcomes(&self) -> impl Iterator<Item = &CombatOutcome> {
        let player: &[CombatOutcome] = match &self.player {
            Some(PlayerOutcome::Attacked(outcome)) => std::slice::from_ref(outcome),
            Some(PlayerOutcome::Used { outcome, .. }) => outcome.combat_outcomes(),
            _ => &[],
        };
        let projectiles = self.projectiles.iter().filter_map(|event| match &event.kind {
            ProjectileEventKind::Impact(outcome) => Some(outcome),
            _ => None,
        });
        let enemies = self.enemies.iter().filter_map(|action| match &action.kind {
            EnemyActionKind::Attacked(outcome) => Some(outcome),
            _ => None,
        });
        player.iter().chain(projectiles).chain(enemies)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileEvent {
    pub projectile: EntityId,
    /// Tile where the projectile stopped.
    pub at: Position,
    pub kind: ProjectileEventKind,
}

/// How a projectile left the world. Every variant implies a despawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileEventKind {
    Impact(CombatOutcome),
    /// Stopped by a non-combatant blocker such as an NPC.
    Absorbed(EntityId),
    HitWall,
    OutOfBounds,
    RangeExhausted,
    /// Its target was removed earlier in the same tick.
    Fizzled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAction {
    pub actor: EntityId,
    pub at: Tick,
    pub kind: EnemyActionKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyActionKind {
    Moved { from: Position, to: Position },
    Retreated { from: Position, to: Position },
    Attacked(CombatOutcome),
    AbilityUsed { slot: usize, projectiles: Vec<EntityId> },
    /// Turn spent without effect (player out of sight or no path).
    Idle,
}
