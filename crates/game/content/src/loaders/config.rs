//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            (1..=GameConfig::MAX_TICK_QUANTUM).contains(&config.tick_quantum),
            "tick_quantum must lie in 1..={}",
            GameConfig::MAX_TICK_QUANTUM
        );
        anyhow::ensure!(
            config.combat_ticks_per_turn > 0,
            "combat_ticks_per_turn must be positive"
        );
        anyhow::ensure!(
            config.chill_defense_percent <= 100,
            "chill_defense_percent must be at most 100"
        );
        Ok(config)
    }
}
