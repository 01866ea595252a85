/// Game configuration constants and tunable parameters.
///
/// Every balance number the rules consult lives here or in the
/// [`ConsumableCatalog`](crate::env::ConsumableCatalog); nothing is hardcoded
/// in the resolvers themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Simulated milliseconds advanced by one `RealTimeTick`.
    pub tick_quantum: u64,
    /// Quanta run per player action while the game is in combat mode.
    pub combat_ticks_per_turn: u32,
    /// A hostile within this distance of the player switches to combat mode.
    /// Zero keeps the game in exploration mode permanently.
    pub engage_radius: u32,
    /// Enemies only pursue or shoot at a player within this distance.
    pub sight_radius: u32,
    /// Percentage of defense removed while an entity is chilled.
    pub chill_defense_percent: u32,
    /// Action interval multiplier (in percent) while an entity is chilled.
    pub chill_interval_percent: u32,
    /// Stat multiplier (in percent) applied to boss templates at spawn time.
    pub boss_stat_percent: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_INVENTORY_SLOTS: usize = 16;
    pub const MAX_ABILITIES: usize = 4;
    /// Upper bound on the quantum (one simulated minute per tick).
    pub const MAX_TICK_QUANTUM: u64 = 60_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_QUANTUM: u64 = 100;
    pub const DEFAULT_COMBAT_TICKS_PER_TURN: u32 = 10;
    pub const DEFAULT_ENGAGE_RADIUS: u32 = 8;
    pub const DEFAULT_SIGHT_RADIUS: u32 = 8;
    pub const DEFAULT_CHILL_DEFENSE_PERCENT: u32 = 50;
    pub const DEFAULT_CHILL_INTERVAL_PERCENT: u32 = 200;
    pub const DEFAULT_BOSS_STAT_PERCENT: u32 = 100;

    pub fn new() -> Self {
        Self {
            tick_quantum: Self::DEFAULT_TICK_QUANTUM,
            combat_ticks_per_turn: Self::DEFAULT_COMBAT_TICKS_PER_TURN,
            engage_radius: Self::DEFAULT_ENGAGE_RADIUS,
            sight_radius: Self::DEFAULT_SIGHT_RADIUS,
            chill_defense_percent: Self::DEFAULT_CHILL_DEFENSE_PERCENT,
            chill_interval_percent: Self::DEFAULT_CHILL_INTERVAL_PERCENT,
            boss_stat_percent: Self::DEFAULT_BOSS_STAT_PERCENT,
        }
    }

    /// Quantum actually used by the scheduler, clamped to
    /// `1..=MAX_TICK_QUANTUM`. A zero quantum would stall every clock.
    pub fn quantum(&self) -> u64 {
        self.tick_quantum.clamp(1, Self::MAX_TICK_QUANTUM)
    }

    /// Quanta per player action while in combat mode (at least one).
    pub fn combat_ticks(&self) -> u32 {
        self.combat_ticks_per_turn.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
