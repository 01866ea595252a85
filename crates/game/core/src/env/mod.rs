//! Read-only inputs consulted by the rules.
//!
//! The world grid, the consumable catalog and the RNG never change during a
//! scheduler cycle. [`GameEnv`] bundles the latter two with the tunable
//! [`GameConfig`] so resolvers take one borrowed environment instead of loose
//! parameters.
mod catalog;
mod map;
mod rng;
mod templates;

pub use catalog::ConsumableCatalog;
pub use map::{MapDimensions, OutOfBounds, StaticTile, TerrainKind, Tile, WorldGrid};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use templates::ActorTemplate;

use crate::config::GameConfig;

#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub config: &'a GameConfig,
    pub catalog: &'a ConsumableCatalog,
    pub rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, catalog: &'a ConsumableCatalog) -> Self {
        Self::with_rng(config, catalog, &PcgRng)
    }

    pub fn with_rng(
        config: &'a GameConfig,
        catalog: &'a ConsumableCatalog,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            config,
            catalog,
            rng,
        }
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("catalog", self.catalog)
            .finish_non_exhaustive()
    }
}
