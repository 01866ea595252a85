use crate::combat::inflict;
use crate::consumable::{ConsumableError, ConsumableKind, EffectDescriptor, EffectOutcome, Target};
use crate::engine::launch_projectiles;
use crate::env::GameEnv;
use crate::state::{
    Direction, EntityId, GameState, Position, ProjectilePattern, StatusEffect, StatusEffectKind,
};

/// Uses one charge of `kind` from the inventory on behalf of `user`.
///
/// Projectile consumables only spawn projectiles here; their damage is
/// resolved when the real-time phase detects an impact. Fireball and
/// lightning damage lands immediately.
pub fn use_consumable(
    state: &mut GameState,
    env: &GameEnv<'_>,
    kind: ConsumableKind,
    user: EntityId,
    target: Target,
) -> Result<EffectOutcome, ConsumableError> {
    let origin = state
        .entities
        .get(user)
        .map_err(|_| ConsumableError::NotFound(user))?
        .position;

    if state.inventory.charges(kind) == 0 {
        return Err(ConsumableError::OutOfCharge(kind));
    }
    let effect = *env
        .catalog
        .get(kind)
        .ok_or(ConsumableError::Undefined(kind))?;
    if let Target::Position(position) = target {
        if !state.grid.contains(position) {
            return Err(ConsumableError::InvalidTarget(position));
        }
    }

    let outcome = match effect {
        EffectDescriptor::Buff {
            status,
            magnitude,
            duration,
        } => apply_buff(state, user, status, magnitude, duration)?,
        EffectDescriptor::Heal { amount } => heal(state, user, amount)?,
        EffectDescriptor::AreaStatus {
            status,
            magnitude,
            duration,
            radius,
            throw_range,
        } => {
            let center = thrown_at(kind, origin, target, throw_range)?;
            let effect = StatusEffect {
                kind: status,
                magnitude,
                expires_at: state.now() + duration,
            };
            apply_area(state, user, center, radius, effect)?
        }
        EffectDescriptor::Projectile(spec) => {
            let aim = match (spec.pattern, target) {
                (_, Target::Direction(direction)) => direction,
                (_, Target::Position(position)) => origin
                    .is_aligned_with(position)
                    .then(|| Direction::toward(origin, position))
                    .flatten()
                    .ok_or(ConsumableError::InvalidTarget(position))?,
                (ProjectilePattern::Aimed, Target::User) => {
                    return Err(ConsumableError::MissingTarget(kind));
                }
                (_, Target::User) => Direction::North,
            };
            let projectiles = launch_projectiles(state, user, origin, spec, aim)?;
            EffectOutcome::ProjectilesLaunched { projectiles }
        }
        EffectDescriptor::AreaDamage {
            amount,
            radius,
            throw_range,
        } => {
            let center = thrown_at(kind, origin, target, throw_range)?;
            blast(state, user, center, radius, amount)?
        }
        EffectDescriptor::Bolt { amount, range } => bolt(state, user, origin, range, amount)?,
    };

    state.inventory.consume(kind);
    Ok(outcome)
}

/// Tile a thrown item lands on; the user's own tile when no position is given.
fn thrown_at(
    kind: ConsumableKind,
    origin: Position,
    target: Target,
    throw_range: u32,
) -> Result<Position, ConsumableError> {
    let center = match target {
        Target::User => origin,
        Target::Position(position) => position,
        Target::Direction(_) => return Err(ConsumableError::MissingTarget(kind)),
    };
    if origin.chebyshev(center) > throw_range {
        return Err(ConsumableError::InvalidTarget(center));
    }
    Ok(center)
}

fn apply_buff(
    state: &mut GameState,
    user: EntityId,
    status: StatusEffectKind,
    magnitude: i32,
    duration: u64,
) -> Result<EffectOutcome, ConsumableError> {
    let now = state.now();
    let entity = state
        .entities
        .get_mut(user)
        .map_err(|_| ConsumableError::NotFound(user))?;
    if entity.status.has(status, now) {
        return Err(ConsumableError::AlreadyActive(status));
    }

    let expires_at = now + duration;
    // Expired leftovers of the same kind are replaced rather than merged.
    entity.status.remove(status);
    entity.status.add(StatusEffect {
        kind: status,
        magnitude,
        expires_at,
    });

    Ok(EffectOutcome::Buffed {
        status,
        magnitude,
        expires_at,
    })
}

fn heal(state: &mut GameState, user: EntityId, amount: u32) -> Result<EffectOutcome, ConsumableError> {
    let entity = state
        .entities
        .get_mut(user)
        .map_err(|_| ConsumableError::NotFound(user))?;
    if entity.health.is_full() {
        return Err(ConsumableError::HealthFull);
    }
    let amount = entity.health.restore(amount);
    Ok(EffectOutcome::Healed { amount })
}

/// Applies `effect` to every combatant other than `user` within Euclidean
/// `radius` of `center`.
fn apply_area(
    state: &mut GameState,
    user: EntityId,
    center: Position,
    radius: u32,
    effect: StatusEffect,
) -> Result<EffectOutcome, ConsumableError> {
    let affected: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|e| e.id != user && e.is_combatant())
        .filter(|e| center.within_radius(e.position, radius))
        .map(|e| e.id)
        .collect();

    if affected.is_empty() {
        return Err(ConsumableError::NoTargets);
    }

    for id in &affected {
        if let Ok(entity) = state.entities.get_mut(*id) {
            entity.status.add(effect);
        }
    }

    Ok(EffectOutcome::AreaApplied {
        status: effect.kind,
        center,
        affected,
    })
}

/// Deals `amount` to every combatant within Euclidean `radius` of `center`,
/// the user included.
fn blast(
    state: &mut GameState,
    user: EntityId,
    center: Position,
    radius: u32,
    amount: u32,
) -> Result<EffectOutcome, ConsumableError> {
    let caught: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|e| e.is_combatant() && center.within_radius(e.position, radius))
        .map(|e| e.id)
        .collect();
    if caught.is_empty() {
        return Err(ConsumableError::NoTargets);
    }

    // Every id was checked live and combatant above, so no hit can fail.
    let hits = caught
        .into_iter()
        .filter_map(|id| inflict(state, user, id, amount).ok())
        .collect();
    Ok(EffectOutcome::Blasted { center, hits })
}

/// Deals `amount` to the closest combatant other than `user` within `range`,
/// lowest id first on ties.
fn bolt(
    state: &mut GameState,
    user: EntityId,
    origin: Position,
    range: u32,
    amount: u32,
) -> Result<EffectOutcome, ConsumableError> {
    let target = state
        .entities
        .iter()
        .filter(|e| e.id != user && e.is_combatant())
        .filter(|e| origin.within_radius(e.position, range))
        .min_by_key(|e| (origin.distance_squared(e.position), e.id))
        .map(|e| e.id)
        .ok_or(ConsumableError::NoTargets)?;

    inflict(state, user, target, amount)
        .map(EffectOutcome::Struck)
        .map_err(|_| ConsumableError::NotFound(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ConsumableCatalog, MapDimensions, StaticTile, TerrainKind, WorldGrid};
    use crate::state::{EntityKind, EntitySpec, StatBlock, Tick};

    struct Fixture {
        state: GameState,
        config: GameConfig,
        catalog: ConsumableCatalog,
        player: EntityId,
    }

    impl Fixture {
        fn new() -> Self {
            let grid = WorldGrid::filled(
                MapDimensions::new(12, 12),
                StaticTile::new(TerrainKind::Floor),
            );
            let mut state = GameState::new(grid);
            let player = state
                .spawn(
                    EntitySpec::new(EntityKind::Player, StatBlock::new(2, 1, 30, 0)),
                    Position::new(5, 5),
                )
                .unwrap();
            Self {
                state,
                config: GameConfig::default(),
                catalog: ConsumableCatalog::default(),
                player,
            }
        }

        fn enemy_at(&mut self, x: i32, y: i32) -> EntityId {
            self.state
                .spawn(
                    EntitySpec::new(EntityKind::Enemy, StatBlock::new(3, 4, 10, 1_000)),
                    Position::new(x, y),
                )
                .unwrap()
        }

        fn use_item(
            &mut self,
            kind: ConsumableKind,
            target: Target,
        ) -> Result<EffectOutcome, ConsumableError> {
            let env = GameEnv::new(&self.config, &self.catalog);
            use_consumable(&mut self.state, &env, kind, self.player, target)
        }
    }

    #[test]
    fn zero_charge_is_rejected_without_changes() {
        let mut fx = Fixture::new();
        let before = fx.state.clone();

        let result = fx.use_item(ConsumableKind::StrengthPotion, Target::User);

        assert_eq!(
            result,
            Err(ConsumableError::OutOfCharge(ConsumableKind::StrengthPotion))
        );
        assert_eq!(fx.state, before);
    }

    #[test]
    fn strength_potion_buffs_until_expiry_and_spends_the_stack() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::StrengthPotion, 1);

        let outcome = fx
            .use_item(ConsumableKind::StrengthPotion, Target::User)
            .unwrap();

        let expires_at = Tick(ConsumableCatalog::STRENGTH_DURATION);
        assert_eq!(
            outcome,
            EffectOutcome::Buffed {
                status: StatusEffectKind::Strengthened,
                magnitude: ConsumableCatalog::STRENGTH_BONUS,
                expires_at,
            }
        );
        let player = fx.state.entities.get(fx.player).unwrap();
        assert_eq!(player.effective_attack(Tick::ZERO), 5);
        assert_eq!(player.effective_attack(expires_at), 2);
        assert!(fx.state.inventory.stacks().is_empty());
    }

    #[test]
    fn active_buff_cannot_be_stacked() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::DefensePotion, 2);
        fx.use_item(ConsumableKind::DefensePotion, Target::User)
            .unwrap();

        let again = fx.use_item(ConsumableKind::DefensePotion, Target::User);

        assert_eq!(
            again,
            Err(ConsumableError::AlreadyActive(StatusEffectKind::Fortified))
        );
        assert_eq!(fx.state.inventory.charges(ConsumableKind::DefensePotion), 1);
    }

    #[test]
    fn healing_requires_missing_health() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::HealingPotion, 2);
        assert_eq!(
            fx.use_item(ConsumableKind::HealingPotion, Target::User),
            Err(ConsumableError::HealthFull)
        );

        fx.state
            .entities
            .get_mut(fx.player)
            .unwrap()
            .health
            .drain(2);
        assert_eq!(
            fx.use_item(ConsumableKind::HealingPotion, Target::User),
            Ok(EffectOutcome::Healed { amount: 2 })
        );
        assert_eq!(fx.state.inventory.charges(ConsumableKind::HealingPotion), 1);
    }

    #[test]
    fn ice_bomb_reaches_exactly_the_radius() {
        let mut fx = Fixture::new();
        fx.catalog.insert(
            ConsumableKind::IceBomb,
            EffectDescriptor::AreaStatus {
                status: StatusEffectKind::Chilled,
                magnitude: 0,
                duration: 1_000,
                radius: 2,
                throw_range: 8,
            },
        );
        fx.state.inventory.add(ConsumableKind::IceBomb, 1);
        let center = Position::new(8, 8);
        let inside = [fx.enemy_at(8, 8), fx.enemy_at(10, 8), fx.enemy_at(9, 9)];
        let outside = [fx.enemy_at(10, 9), fx.enemy_at(8, 11)];

        let outcome = fx
            .use_item(ConsumableKind::IceBomb, Target::Position(center))
            .unwrap();

        let EffectOutcome::AreaApplied { affected, .. } = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(affected, inside.to_vec());
        let now = fx.state.now();
        for id in inside {
            let entity = fx.state.entities.get(id).unwrap();
            assert!(entity.status.has(StatusEffectKind::Chilled, now));
            assert_eq!(entity.effective_defense(now, &fx.config), 2);
            assert_eq!(entity.health.current(), 10);
        }
        for id in outside {
            let entity = fx.state.entities.get(id).unwrap();
            assert!(!entity.status.has(StatusEffectKind::Chilled, now));
        }
        assert!(
            !fx.state
                .entities
                .get(fx.player)
                .unwrap()
                .status
                .has(StatusEffectKind::Chilled, now)
        );
    }

    #[test]
    fn ice_bomb_rejects_bad_targets() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::IceBomb, 1);
        let before = fx.state.clone();

        assert_eq!(
            fx.use_item(ConsumableKind::IceBomb, Target::Position(Position::new(-1, 3))),
            Err(ConsumableError::InvalidTarget(Position::new(-1, 3)))
        );
        assert_eq!(
            fx.use_item(ConsumableKind::IceBomb, Target::Position(Position::new(7, 7))),
            Err(ConsumableError::NoTargets)
        );
        assert_eq!(fx.state, before);
    }

    #[test]
    fn scrolls_spawn_projectiles_without_damage() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::ShockwaveScroll, 1);
        fx.state.inventory.add(ConsumableKind::ArrowScroll, 1);
        let enemy = fx.enemy_at(6, 5);

        let ring = fx
            .use_item(ConsumableKind::ShockwaveScroll, Target::User)
            .unwrap();
        let EffectOutcome::ProjectilesLaunched { projectiles } = ring else {
            panic!("unexpected outcome {ring:?}");
        };
        assert_eq!(projectiles.len(), 8);
        assert_eq!(fx.state.projectiles_in_flight(), 8);
        assert_eq!(fx.state.entities.get(enemy).unwrap().health.current(), 10);

        assert_eq!(
            fx.use_item(ConsumableKind::ArrowScroll, Target::User),
            Err(ConsumableError::MissingTarget(ConsumableKind::ArrowScroll))
        );
        let arrow = fx
            .use_item(
                ConsumableKind::ArrowScroll,
                Target::Direction(Direction::East),
            )
            .unwrap();
        assert!(matches!(
            arrow,
            EffectOutcome::ProjectilesLaunched { ref projectiles } if projectiles.len() == 1
        ));
    }

    #[test]
    fn position_aim_must_lie_on_a_compass_line() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::ArrowScroll, 1);
        let before = fx.state.clone();

        let off_line = Position::new(9, 6);
        assert_eq!(
            fx.use_item(ConsumableKind::ArrowScroll, Target::Position(off_line)),
            Err(ConsumableError::InvalidTarget(off_line))
        );
        assert_eq!(
            fx.use_item(ConsumableKind::ArrowScroll, Target::Position(Position::new(5, 5))),
            Err(ConsumableError::InvalidTarget(Position::new(5, 5)))
        );
        assert_eq!(fx.state, before);

        let diagonal = fx
            .use_item(ConsumableKind::ArrowScroll, Target::Position(Position::new(8, 2)))
            .unwrap();
        let EffectOutcome::ProjectilesLaunched { projectiles } = diagonal else {
            panic!("unexpected outcome {diagonal:?}");
        };
        let motion = fx.state.entities.get(projectiles[0]).unwrap().projectile.unwrap();
        assert!(motion.velocity.x > 0 && motion.velocity.y < 0);
        assert_eq!(motion.velocity.x, -motion.velocity.y);
        assert_eq!(fx.state.inventory.charges(ConsumableKind::ArrowScroll), 0);
    }

    #[test]
    fn confusion_needs_another_creature_on_the_tile() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::ConfusionScroll, 1);
        let orc = fx.enemy_at(7, 6);
        fx.enemy_at(8, 6);

        assert_eq!(
            fx.use_item(ConsumableKind::ConfusionScroll, Target::User),
            Err(ConsumableError::NoTargets)
        );
        let outcome = fx
            .use_item(ConsumableKind::ConfusionScroll, Target::Position(Position::new(7, 6)))
            .unwrap();

        assert!(matches!(
            outcome,
            EffectOutcome::AreaApplied { status: StatusEffectKind::Confused, ref affected, .. }
                if affected == &vec![orc]
        ));
        let now = fx.state.now();
        assert!(fx.state.entities.get(orc).unwrap().status.has(StatusEffectKind::Confused, now));
    }

    #[test]
    fn fireball_burns_everyone_in_the_radius_including_the_user() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::FireballScroll, 2);
        let near = fx.enemy_at(7, 5);
        let far = fx.enemy_at(11, 11);

        let outcome = fx
            .use_item(ConsumableKind::FireballScroll, Target::Position(Position::new(6, 5)))
            .unwrap();

        let EffectOutcome::Blasted { hits, .. } = &outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        let defenders: Vec<_> = hits.iter().map(|hit| hit.defender).collect();
        assert_eq!(defenders, vec![fx.player, near]);
        assert!(hits.iter().all(|hit| hit.damage_dealt == ConsumableCatalog::FIREBALL_DAMAGE));
        assert!(hits[1].defender_died);
        assert_eq!(outcome.combat_outcomes().len(), 2);
        assert_eq!(fx.state.entities.get(fx.player).unwrap().health.current(), 18);
        assert_eq!(fx.state.entities.get(far).unwrap().health.current(), 10);

        let before = fx.state.clone();
        assert_eq!(
            fx.use_item(ConsumableKind::FireballScroll, Target::Position(Position::new(1, 10))),
            Err(ConsumableError::NoTargets)
        );
        assert_eq!(fx.state, before);
    }

    #[test]
    fn lightning_strikes_the_nearest_other_creature() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::LightningScroll, 2);
        let first = fx.enemy_at(3, 5);
        let tied = fx.enemy_at(7, 5);
        let diagonal = fx.enemy_at(6, 6);

        let outcome = fx
            .use_item(ConsumableKind::LightningScroll, Target::User)
            .unwrap();
        let EffectOutcome::Struck(hit) = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(hit.defender, diagonal);
        assert!(hit.defender_died);

        let outcome = fx
            .use_item(ConsumableKind::LightningScroll, Target::User)
            .unwrap();
        assert!(matches!(outcome, EffectOutcome::Struck(hit) if hit.defender == first));
        assert!(fx.state.entities.get(tied).is_ok());
        assert_eq!(fx.state.entities.get(fx.player).unwrap().health.current(), 30);
    }

    #[test]
    fn lightning_without_anyone_in_range_keeps_its_charge() {
        let mut fx = Fixture::new();
        fx.state.inventory.add(ConsumableKind::LightningScroll, 1);
        fx.enemy_at(11, 11);
        let before = fx.state.clone();

        assert_eq!(
            fx.use_item(ConsumableKind::LightningScroll, Target::User),
            Err(ConsumableError::NoTargets)
        );
        assert_eq!(fx.state, before);
    }
}
