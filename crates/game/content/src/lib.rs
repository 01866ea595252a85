//! Map and content loading.
//!
//! Reads the static inputs the rules treat as read-only configuration:
//! - map layouts (RON)
//! - actor stat tables, the "bestiary" (RON)
//! - consumable effect tables (RON)
//! - scenarios placing the player, enemies, bosses and NPCs (RON)
//! - game configuration (TOML)
//!
//! [`ContentFactory`] combines them into an initial `GameState`. Loader
//! failures are the only unrecoverable errors in the game and are reported
//! with file and parse context through `anyhow`.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    Bestiary, BestiaryLoader, CatalogLoader, ConfigLoader, ContentFactory, GameContent,
    LoadResult, MapLoader, Placement, Scenario, ScenarioLoader, build_state,
};
