//! Content factory assembling a playable game from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{ConsumableCatalog, GameConfig, GameState, WorldGrid};

use crate::loaders::{
    Bestiary, BestiaryLoader, CatalogLoader, ConfigLoader, LoadResult, MapLoader, Placement,
    Scenario, ScenarioLoader,
};

/// Loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── consumables.ron
/// ├── bestiary.ron
/// ├── maps/
/// │   └── dungeon.ron
/// └── scenarios/
///     └── dungeon.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything a session needs: read-only rules plus the initial state.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub catalog: ConsumableCatalog,
    pub bestiary: Bestiary,
    pub state: GameState,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Loads `consumables.ron` over the stock effects, or the stock effects
    /// alone when the file is absent.
    pub fn load_catalog(&self) -> LoadResult<ConsumableCatalog> {
        let path = self.data_dir.join("consumables.ron");
        if !path.exists() {
            return Ok(ConsumableCatalog::default());
        }
        CatalogLoader::load(&path)
    }

    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    pub fn load_map(&self, name: &str) -> LoadResult<WorldGrid> {
        MapLoader::load(&self.data_dir.join("maps").join(format!("{name}.ron")))
    }

    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.data_dir.join("scenarios").join(format!("{name}.ron")))
    }

    /// Loads every file a scenario needs and builds its initial state.
    pub fn load_game(&self, scenario: &str) -> LoadResult<GameContent> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;
        let bestiary = self.load_bestiary()?;
        let scenario = self
            .load_scenario(scenario)
            .with_context(|| format!("Failed to load scenario '{}'", scenario))?;
        let grid = self.load_map(&scenario.map)?;
        let state = build_state(&scenario, grid, &bestiary, &config)?;

        Ok(GameContent {
            config,
            catalog,
            bestiary,
            state,
        })
    }
}

/// Places the scenario's player, entities and starting inventory on `grid`.
///
/// The player is spawned first, so it always receives the lowest id.
pub fn build_state(
    scenario: &Scenario,
    grid: WorldGrid,
    bestiary: &Bestiary,
    config: &GameConfig,
) -> LoadResult<GameState> {
    let mut state = GameState::with_seed(grid, scenario.seed);

    let player = place(&mut state, &scenario.player, bestiary, config)?;
    anyhow::ensure!(
        state
            .entities
            .get(player)
            .is_ok_and(|e| e.kind == game_core::EntityKind::Player),
        "scenario player template '{}' is not a Player",
        scenario.player.template
    );

    for placement in &scenario.entities {
        place(&mut state, placement, bestiary, config)?;
    }

    for (kind, charges) in &scenario.inventory {
        anyhow::ensure!(
            state.inventory.add(*kind, *charges),
            "inventory is full, cannot add {}",
            kind
        );
    }

    Ok(state)
}

fn place(
    state: &mut GameState,
    placement: &Placement,
    bestiary: &Bestiary,
    config: &GameConfig,
) -> LoadResult<game_core::EntityId> {
    let (template_id, template) = bestiary
        .get(&placement.template)
        .with_context(|| format!("Unknown template '{}'", placement.template))?;

    let spec = template
        .to_spec(template_id, config)
        .with_context(|| format!("Invalid template '{}'", placement.template))?;
    state
        .spawn(spec, placement.at)
        .with_context(|| {
            format!(
                "Failed to place '{}' at ({}, {})",
                placement.template, placement.at.x, placement.at.y
            )
        })
}
