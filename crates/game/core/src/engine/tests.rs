use super::*;
use crate::action::PlayerOutcome;
use crate::config::GameConfig;
use crate::consumable::{ConsumableKind, Target};
use crate::env::{ConsumableCatalog, MapDimensions, WorldGrid};
use crate::state::{
    Ability, Direction, EntityId, EntitySpec, Position, ProjectilePattern, RegistryError,
    StatBlock, StatusEffect, StatusEffectKind, Tick,
};

struct World {
    state: GameState,
    config: GameConfig,
    catalog: ConsumableCatalog,
    player: EntityId,
}

impl World {
    fn new(player_stats: StatBlock) -> Self {
        let mut state = GameState::with_seed(WorldGrid::walled(MapDimensions::new(20, 20)), 7);
        let player = state
            .spawn(
                EntitySpec::new(EntityKind::Player, player_stats),
                Position::new(1, 1),
            )
            .unwrap();
        Self {
            state,
            config: GameConfig::default(),
            catalog: ConsumableCatalog::default(),
            player,
        }
    }

    fn spawn(&mut self, spec: EntitySpec, x: i32, y: i32) -> EntityId {
        self.state.spawn(spec, Position::new(x, y)).unwrap()
    }

    fn submit(&mut self, action: PlayerAction) -> Result<CycleReport, ActionError> {
        let env = GameEnv::new(&self.config, &self.catalog);
        GameEngine::new(&mut self.state, env).submit(action)
    }

    fn idle(&mut self) -> CycleReport {
        let env = GameEnv::new(&self.config, &self.catalog);
        GameEngine::new(&mut self.state, env).idle_tick().unwrap()
    }
}

fn enemy(attack: i32, defense: i32, health: u32, interval: u64) -> EntitySpec {
    EntitySpec::new(
        EntityKind::Enemy,
        StatBlock::new(attack, defense, health, interval),
    )
}

fn actions_of(reports: &[CycleReport], actor: EntityId) -> Vec<Tick> {
    reports
        .iter()
        .flat_map(|r| r.enemies.iter())
        .filter(|a| a.actor == actor)
        .map(|a| a.at)
        .collect()
}

#[test]
fn enemy_acts_once_per_interval() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let far = world.spawn(enemy(3, 0, 10, 1_000), 15, 15);

    let reports: Vec<_> = (0..100).map(|_| world.idle()).collect();
    let acted = actions_of(&reports, far);

    assert_eq!(acted.len(), 10);
    assert!(acted.windows(2).all(|w| w[1].0 - w[0].0 >= 1_000));
    assert_eq!(world.state.now(), Tick(10_000));
    assert!(reports.iter().all(|r| r.mode == GameMode::Exploration));
}

#[test]
fn interval_off_the_quantum_grid_keeps_its_minimum_gap() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let far = world.spawn(enemy(3, 0, 10, 150), 15, 15);

    let reports: Vec<_> = (0..300).map(|_| world.idle()).collect();
    let acted = actions_of(&reports, far);

    assert!(acted.windows(2).all(|w| w[1].0 - w[0].0 >= 150));
    assert_eq!(acted.len(), 150);
}

#[test]
fn chill_stretches_the_interval() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let slowed = world.spawn(enemy(3, 0, 10, 1_000), 15, 15);
    world
        .state
        .entities
        .get_mut(slowed)
        .unwrap()
        .status
        .add(StatusEffect {
            kind: StatusEffectKind::Chilled,
            magnitude: 0,
            expires_at: Tick(100_000),
        });

    let reports: Vec<_> = (0..100).map(|_| world.idle()).collect();

    assert_eq!(actions_of(&reports, slowed).len(), 5);
}

#[test]
fn rejected_action_changes_nothing() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    world.spawn(enemy(3, 0, 10, 100), 3, 1);
    let before = world.state.clone();

    let into_wall = world.submit(PlayerAction::Move(Direction::North));
    let empty_air = world.submit(PlayerAction::Attack(Direction::South));
    let no_charge = world.submit(PlayerAction::use_consumable(
        ConsumableKind::IceBomb,
        Target::Position(Position::new(3, 1)),
    ));

    assert!(matches!(
        into_wall,
        Err(ActionError::Registry(RegistryError::Blocked { .. }))
    ));
    assert_eq!(
        empty_air,
        Err(ActionError::NothingToAttack(Position::new(1, 2)))
    );
    assert!(matches!(no_charge, Err(ActionError::Consumable(_))));
    assert_eq!(world.state, before);
    assert_eq!(world.state.turn.phase, SchedulerPhase::AwaitingPlayerInput);
}

#[test]
fn combat_mode_runs_full_turns_and_suspends_idle_ticks() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let orc = world.spawn(enemy(3, 0, 10, 1_000), 6, 1);

    let first = world.submit(PlayerAction::Wait).unwrap();
    assert_eq!(first.ticks_run, 1);
    assert!(first.mode_changed);
    assert_eq!(first.mode, GameMode::Combat);

    let idle = world.idle();
    assert_eq!(idle.ticks_run, 0);
    assert_eq!(idle.clock, Tick(100));

    let turn = world.submit(PlayerAction::Wait).unwrap();
    assert_eq!(turn.ticks_run, world.config.combat_ticks_per_turn);
    assert_eq!(turn.clock, Tick(1_100));
    assert!(matches!(
        turn.enemies.as_slice(),
        [EnemyAction { kind: EnemyActionKind::Moved { .. }, .. }]
    ));
    let orc_pos = world.state.entities.get(orc).unwrap().position;
    assert_eq!(orc_pos.chebyshev(Position::new(1, 1)), 4);
}

#[test]
fn projectiles_keep_flying_across_cycles() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let target = world.spawn(enemy(3, 0, 10, 100_000), 6, 1);
    world.state.inventory.add(ConsumableKind::ArrowScroll, 1);

    let fired = world
        .submit(PlayerAction::use_consumable(
            ConsumableKind::ArrowScroll,
            Target::Direction(Direction::East),
        ))
        .unwrap();
    assert!(matches!(fired.player, Some(PlayerOutcome::Used { .. })));
    assert_eq!(world.state.projectiles_in_flight(), 1);
    assert!(world.state.inventory.is_empty());

    let idle = world.idle();
    assert_eq!(idle.ticks_run, 1);

    let turn = world.submit(PlayerAction::Wait).unwrap();
    let impact = turn
        .projectiles
        .iter()
        .find_map(|e| match &e.kind {
            ProjectileEventKind::Impact(outcome) => Some(*outcome),
            _ => None,
        })
        .unwrap();
    assert_eq!(impact.defender, target);
    assert_eq!(impact.damage_dealt, 8);
    assert_eq!(world.state.entities.get(target).unwrap().health.current(), 2);
    assert_eq!(world.state.projectiles_in_flight(), 0);
}

#[test]
fn ability_cooldown_counts_own_actions() {
    let mut world = World::new(StatBlock::new(2, 0, 500, 0));
    let ring = Ability {
        trigger_range: 4,
        cooldown: 3,
        chance_percent: 100,
        power_percent: 200,
        speed: 10,
        projectile_range: 4,
        pattern: ProjectilePattern::Ring,
    };
    let boss = world.spawn(
        EntitySpec::new(EntityKind::Boss, StatBlock::new(3, 0, 40, 100))
            .with_ability(ring)
            .unwrap(),
        5,
        1,
    );

    let reports = vec![
        world.submit(PlayerAction::Wait).unwrap(),
        world.submit(PlayerAction::Wait).unwrap(),
    ];
    let actions: Vec<_> = reports
        .iter()
        .flat_map(|r| r.enemies.iter())
        .filter(|a| a.actor == boss)
        .collect();
    let fired: Vec<_> = actions
        .iter()
        .enumerate()
        .filter(|(_, a)| matches!(a.kind, EnemyActionKind::AbilityUsed { .. }))
        .map(|(index, _)| index)
        .collect();

    assert_eq!(actions.len(), 11);
    assert_eq!(fired, vec![0, 3, 6, 9]);
}

#[test]
fn defeating_the_last_boss_ends_the_game() {
    let mut world = World::new(StatBlock::new(10, 1, 30, 0));
    world.spawn(
        EntitySpec::new(EntityKind::Boss, StatBlock::new(8, 4, 5, 1_000)),
        2,
        1,
    );

    let report = world.submit(PlayerAction::Attack(Direction::East)).unwrap();

    assert_eq!(report.game_over, Some(GameOver::BossDefeated));
    assert_eq!(report.ticks_run, 0);
    assert_eq!(
        world.submit(PlayerAction::Wait),
        Err(ActionError::GameOver(GameOver::BossDefeated))
    );
}

#[test]
fn scroll_kill_of_the_last_boss_ends_the_game() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let boss = world.spawn(
        EntitySpec::new(EntityKind::Boss, StatBlock::new(8, 9, 15, 1_000)),
        4,
        1,
    );
    world.state.inventory.add(ConsumableKind::LightningScroll, 1);

    let report = world
        .submit(PlayerAction::use_consumable(
            ConsumableKind::LightningScroll,
            Target::User,
        ))
        .unwrap();

    let struck: Vec<_> = report.combat_outcomes().collect();
    assert_eq!(struck.len(), 1);
    assert_eq!(struck[0].defender, boss);
    assert!(struck[0].defender_died);
    assert_eq!(report.game_over, Some(GameOver::BossDefeated));
    assert_eq!(report.ticks_run, 0);
}

#[test]
fn confused_enemy_wanders_until_the_status_lapses() {
    let mut world = World::new(StatBlock::new(2, 1, 30, 0));
    let orc = world.spawn(enemy(3, 0, 10, 1_000), 15, 15);
    world
        .state
        .entities
        .get_mut(orc)
        .unwrap()
        .status
        .add(StatusEffect {
            kind: StatusEffectKind::Confused,
            magnitude: 0,
            expires_at: Tick(4_500),
        });

    let reports: Vec<_> = (0..80).map(|_| world.idle()).collect();
    let actions: Vec<_> = reports
        .iter()
        .flat_map(|r| r.enemies.iter())
        .filter(|a| a.actor == orc)
        .collect();

    // Out of sight, an unconfused orc would only ever idle.
    let EnemyActionKind::Moved { from, to } = actions[0].kind else {
        panic!("expected a stumble, got {:?}", actions[0]);
    };
    assert_eq!(from, Position::new(15, 15));
    assert_eq!(from.chebyshev(to), 1);
    assert!(
        actions
            .iter()
            .filter(|a| a.at >= Tick(4_500))
            .all(|a| a.kind == EnemyActionKind::Idle)
    );
}

#[test]
fn player_death_is_reported() {
    let mut world = World::new(StatBlock::new(2, 0, 1, 0));
    world.spawn(enemy(5, 0, 10, 100), 2, 1);

    let report = world.submit(PlayerAction::Wait).unwrap();

    assert_eq!(report.game_over, Some(GameOver::PlayerDied));
    assert!(world.state.player_id().is_none());
    assert!(matches!(
        world.submit(PlayerAction::Wait),
        Err(ActionError::GameOver(GameOver::PlayerDied))
    ));
    assert!(world.state.entities.get(world.player).is_err());
}

#[test]
fn health_stays_in_range_through_a_brawl() {
    let mut world = World::new(StatBlock::new(4, 1, 60, 0));
    for x in [3, 5, 7] {
        world.spawn(enemy(3, 1, 12, 300), x, 3);
    }

    for step in 0..40 {
        let action = if step % 2 == 0 {
            PlayerAction::Attack(Direction::SouthEast)
        } else {
            PlayerAction::Wait
        };
        match world.submit(action) {
            Ok(report) if report.game_over.is_some() => break,
            Ok(_) | Err(ActionError::NothingToAttack(_)) => {}
            Err(err) => panic!("unexpected rejection {err}"),
        }
        for entity in world.state.entities.iter() {
            assert!(entity.health.current() <= entity.health.maximum());
            assert!(entity.is_alive());
        }
    }
}
