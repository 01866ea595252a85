//! Loaders converting RON/TOML files into game-core types.

pub mod bestiary;
pub mod catalog;
pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;

pub use bestiary::{Bestiary, BestiaryLoader};
pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent, build_state};
pub use map::MapLoader;
pub use scenario::{Placement, Scenario, ScenarioLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
