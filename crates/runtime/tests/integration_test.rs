//! End-to-end sessions through the async runtime.

use std::time::Duration;

use game_content::ContentFactory;
use game_core::{
    Direction, EntityKind, EntitySpec, ErrorSeverity, GameMode, GameOver, GameState, MapDimensions,
    PlayerAction, Position, StatBlock, Tick, WorldGrid,
};
use runtime::{
    ChannelProvider, Event, GameStateEvent, Runtime, RuntimeConfig, RuntimeError,
    ScriptedProvider, SessionEvent, Topic,
};

fn turn_based() -> RuntimeConfig {
    RuntimeConfig {
        realtime: false,
        ..RuntimeConfig::default()
    }
}

fn arena(player: StatBlock, others: &[(EntityKind, StatBlock, Position)]) -> GameState {
    let mut state = GameState::with_seed(WorldGrid::walled(MapDimensions::new(20, 20)), 11);
    state
        .spawn(EntitySpec::new(EntityKind::Player, player), Position::new(1, 1))
        .unwrap();
    for (kind, stats, at) in others {
        state.spawn(EntitySpec::new(*kind, *stats), *at).unwrap();
    }
    state
}

#[tokio::test]
async fn shipped_dungeon_plays_through_the_handle() {
    let content = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data"))
        .load_game("dungeon")
        .expect("shipped content should load");
    let runtime = Runtime::builder()
        .config(turn_based())
        .content(content)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = handle.subscribe(Topic::GameState);

    let before = handle.snapshot().await.unwrap();
    let start = before.player_view().unwrap().position;
    assert_eq!(start, Position::new(2, 2));

    let report = handle
        .submit(PlayerAction::Move(Direction::East))
        .await
        .unwrap()
        .expect("the tile east of the start is open");
    assert_eq!(report.ticks_run, 1);

    match events.recv().await.unwrap() {
        Event::GameState(GameStateEvent::CycleCompleted { action, nonce, .. }) => {
            assert_eq!(action, Some(PlayerAction::Move(Direction::East)));
            assert_eq!(nonce, before.nonce + 1);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let after = handle.snapshot().await.unwrap();
    assert_eq!(after.player_view().unwrap().position, Position::new(3, 2));
    assert_eq!(after.clock, Tick(100));
    // Snapshots are detached copies.
    assert_eq!(before.player_view().unwrap().position, start);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_action_is_published_and_changes_nothing() {
    let state = arena(StatBlock::new(2, 1, 30, 0), &[]);
    let runtime = Runtime::builder()
        .config(turn_based())
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = handle.subscribe(Topic::GameState);
    let before = handle.snapshot().await.unwrap();

    let result = handle
        .submit(PlayerAction::Move(Direction::North))
        .await
        .unwrap();
    assert!(result.is_err());

    match events.recv().await.unwrap() {
        Event::GameState(GameStateEvent::ActionRejected {
            code,
            severity,
            clock,
            ..
        }) => {
            assert_eq!(code, "REGISTRY_BLOCKED");
            assert_eq!(severity, ErrorSeverity::Recoverable);
            assert_eq!(clock, Tick(0));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(handle.snapshot().await.unwrap(), before);

    // The scheduler is back to awaiting input.
    assert!(handle.submit(PlayerAction::Wait).await.unwrap().is_ok());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn scripted_session_ends_when_the_boss_falls() {
    let state = arena(
        StatBlock::new(10, 1, 30, 0),
        &[(
            EntityKind::Boss,
            StatBlock::new(8, 4, 5, 1_000),
            Position::new(2, 1),
        )],
    );
    let mut runtime = Runtime::builder()
        .config(turn_based())
        .initial_state(state)
        .player_provider(ScriptedProvider::new([PlayerAction::Attack(Direction::East)]))
        .build()
        .await
        .unwrap();
    let mut session = runtime.handle().subscribe(Topic::Session);

    let outcome = runtime.run().await.unwrap();

    assert_eq!(outcome, Some(GameOver::BossDefeated));
    let event = session.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::Session(SessionEvent::GameOver {
            outcome: GameOver::BossDefeated,
            ..
        })
    ));
    let snapshot = runtime.handle().snapshot().await.unwrap();
    assert_eq!(snapshot.game_over, Some(GameOver::BossDefeated));
    assert!(snapshot.entities.iter().all(|e| e.kind != EntityKind::Boss));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn exhausted_provider_quits_the_session() {
    let state = arena(StatBlock::new(2, 1, 30, 0), &[]);
    let mut runtime = Runtime::builder()
        .config(turn_based())
        .initial_state(state)
        .player_provider(ScriptedProvider::new([PlayerAction::Wait, PlayerAction::Wait]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);

    assert_eq!(runtime.run().await.unwrap(), None);

    match session.recv().await.unwrap() {
        Event::Session(SessionEvent::Quit { clock }) => assert_eq!(clock, Tick(200)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        handle.submit(PlayerAction::Wait).await,
        Err(RuntimeError::CommandChannelClosed)
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn step_requires_a_provider() {
    let mut runtime = Runtime::builder()
        .config(turn_based())
        .initial_state(arena(StatBlock::new(2, 1, 30, 0), &[]))
        .build()
        .await
        .unwrap();

    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ProviderNotSet)
    ));

    runtime.set_player_provider(ScriptedProvider::new([PlayerAction::Wait]));
    let report = runtime.step().await.unwrap().unwrap().unwrap();
    assert_eq!(report.clock, Tick(100));

    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingState)
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn exploration_runs_in_real_time() {
    let state = arena(
        StatBlock::new(2, 1, 30, 0),
        &[(
            EntityKind::Enemy,
            StatBlock::new(3, 0, 10, 1_000),
            Position::new(17, 17),
        )],
    );
    let runtime = Runtime::builder()
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let mut snapshots = runtime.handle().watch_snapshots();

    loop {
        snapshots.changed().await.unwrap();
        if snapshots.borrow().tick_count >= 5 {
            break;
        }
    }

    let snapshot = snapshots.borrow().clone();
    assert_eq!(snapshot.mode, GameMode::Exploration);
    assert_eq!(snapshot.clock, Tick(snapshot.tick_count * 100));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn combat_mode_waits_for_the_player() {
    let state = arena(
        StatBlock::new(2, 1, 30, 0),
        &[(
            EntityKind::Enemy,
            StatBlock::new(3, 0, 10, 100_000),
            Position::new(6, 6),
        )],
    );
    let runtime = Runtime::builder()
        .initial_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    tokio::time::sleep(Duration::from_secs(1)).await;
    let engaged = handle.snapshot().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    let later = handle.snapshot().await.unwrap();

    assert_eq!(engaged.mode, GameMode::Combat);
    assert_eq!(later.clock, engaged.clock);

    let report = handle.submit(PlayerAction::Wait).await.unwrap().unwrap();
    assert_eq!(
        report.ticks_run,
        RuntimeConfig::default().game_config.combat_ticks_per_turn
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn front_end_channel_drives_the_loop() {
    let (tx, provider) = ChannelProvider::channel(8);
    let mut runtime = Runtime::builder()
        .config(turn_based())
        .initial_state(arena(StatBlock::new(2, 1, 30, 0), &[]))
        .player_provider(provider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let idle = handle.idle_tick().await.unwrap().unwrap();
    assert_eq!(idle.ticks_run, 1);
    assert_eq!(idle.clock, Tick(100));

    tx.send(PlayerAction::Move(Direction::South)).await.unwrap();
    let moved = runtime.step().await.unwrap().unwrap().unwrap();
    assert_eq!(moved.clock, Tick(200));

    drop(tx);
    assert!(runtime.step().await.unwrap().is_none());
    let snapshot = handle.watch_snapshots().borrow().clone();
    assert_eq!(snapshot.player_view().unwrap().position, Position::new(1, 2));

    runtime.shutdown().await.unwrap();
}
