//! Hybrid turn/real-time scheduler.
//!
//! [`GameEngine`] drives the state machine
//! `AwaitingPlayerInput -> ResolvingPlayerTurn -> RealTimeTick ->
//! ResolvingEnemyActions -> AwaitingPlayerInput`. A player turn is followed by
//! one quantum in exploration mode or by `combat_ticks_per_turn` quanta in
//! combat mode; each quantum is a `RealTimeTick` followed by
//! `ResolvingEnemyActions`. Idle ticks skip the player phase entirely.
//!
//! All world mutation happens here. Renderers read a [`Snapshot`](crate::Snapshot)
//! taken after the cycle returns.

mod enemies;
mod errors;
mod pathing;
mod player;
mod projectiles;
mod report;
#[cfg(test)]
mod tests;

pub use errors::ActionError;
pub use pathing::{next_step, retreat_step};
pub use projectiles::launch_projectiles;
pub use report::{
    CycleReport, EnemyAction, EnemyActionKind, ProjectileEvent, ProjectileEventKind,
};

use crate::action::PlayerAction;
use crate::env::GameEnv;
use crate::state::{EntityKind, GameMode, GameOver, GameState, SchedulerPhase};

pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Runs one full cycle for a player action.
    ///
    /// A rejected action leaves the state exactly as it was and the scheduler
    /// back in `AwaitingPlayerInput`.
    pub fn submit(&mut self, action: PlayerAction) -> Result<CycleReport, ActionError> {
        self.ensure_awaiting_input()?;

        self.state.turn.phase = SchedulerPhase::ResolvingPlayerTurn;
        let outcome = match player::apply(self.state, &self.env, action) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state.turn.phase = SchedulerPhase::AwaitingPlayerInput;
                return Err(err);
            }
        };

        let mut report = CycleReport {
            player: Some(outcome),
            ..CycleReport::default()
        };
        self.check_game_over(&mut report);

        let ticks = match self.state.turn.mode {
            GameMode::Exploration => 1,
            GameMode::Combat => self.env.config.combat_ticks(),
        };
        for _ in 0..ticks {
            if report.game_over.is_some() {
                break;
            }
            self.run_quantum(&mut report);
        }

        self.finish_cycle(&mut report);
        Ok(report)
    }

    /// Advances the world by one quantum without a player action.
    ///
    /// In combat mode the world waits for the player, so the tick is skipped
    /// (`ticks_run == 0`) unless projectiles are still in flight.
    pub fn idle_tick(&mut self) -> Result<CycleReport, ActionError> {
        self.ensure_awaiting_input()?;

        let mut report = CycleReport::default();
        if !self.state.idle_suspended() {
            self.run_quantum(&mut report);
        }

        self.finish_cycle(&mut report);
        Ok(report)
    }

    fn ensure_awaiting_input(&self) -> Result<(), ActionError> {
        if let Some(over) = self.state.turn.game_over {
            return Err(ActionError::GameOver(over));
        }
        match self.state.turn.phase {
            SchedulerPhase::AwaitingPlayerInput => Ok(()),
            phase => Err(ActionError::NotAwaitingInput(phase)),
        }
    }

    /// One `RealTimeTick` followed by `ResolvingEnemyActions`.
    fn run_quantum(&mut self, report: &mut CycleReport) {
        let quantum = self.env.config.quantum();

        self.state.turn.phase = SchedulerPhase::RealTimeTick;
        self.state.turn.clock += quantum;
        self.state.turn.tick_count += 1;
        report.ticks_run += 1;

        let now = self.state.now();
        let ids: Vec<_> = self.state.entities.iter().map(|e| e.id).collect();
        for id in ids {
            if let Ok(entity) = self.state.entities.get_mut(id) {
                report.expired_statuses += entity.status.remove_expired(now);
                entity.clock.advance(quantum);
            }
        }
        projectiles::advance_projectiles(self.state, self.env.config, &mut report.projectiles);
        self.check_game_over(report);
        if report.game_over.is_some() {
            return;
        }

        self.state.turn.phase = SchedulerPhase::ResolvingEnemyActions;
        enemies::resolve_enemy_actions(self.state, &self.env, &mut report.enemies);
        self.check_game_over(report);
    }

    fn check_game_over(&mut self, report: &mut CycleReport) {
        if self.state.turn.game_over.is_some() {
            return;
        }

        let over = if self.state.player_id().is_none() {
            Some(GameOver::PlayerDied)
        } else {
            let boss_fell = report
                .combat_outcomes()
                .any(|o| o.defender_died && o.defender_kind == EntityKind::Boss);
            let bosses_left = self.state.entities.all_of_kind(EntityKind::Boss).count();
            (boss_fell && bosses_left == 0).then_some(GameOver::BossDefeated)
        };

        if over.is_some() {
            self.state.turn.game_over = over;
            report.game_over = over;
        }
    }

    fn finish_cycle(&mut self, report: &mut CycleReport) {
        if let Some(player) = self.state.player_id() {
            if let Ok(entity) = self.state.entities.get_mut(player) {
                if report.player.is_some() {
                    entity.clock.record_turn();
                }
            }
        }

        let mode = self.evaluate_mode();
        report.mode_changed = mode != self.state.turn.mode;
        self.state.turn.mode = mode;
        self.state.turn.nonce += 1;
        self.state.turn.phase = SchedulerPhase::AwaitingPlayerInput;

        report.mode = mode;
        report.clock = self.state.now();
        report.game_over = self.state.turn.game_over;
    }

    fn evaluate_mode(&self) -> GameMode {
        let radius = self.env.config.engage_radius;
        let Some(player) = self.state.player() else {
            return self.state.turn.mode;
        };
        if radius == 0 {
            return GameMode::Exploration;
        }

        let engaged = self
            .state
            .entities
            .iter()
            .any(|e| e.is_hostile() && e.position.chebyshev(player.position) <= radius);
        if engaged {
            GameMode::Combat
        } else {
            GameMode::Exploration
        }
    }
}
