//! Scenario loader: which map to use and what stands where at the start.

use std::path::Path;

use game_core::{ConsumableKind, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One entity placement referring to a bestiary template by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub template: String,
    pub at: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Map file name under `maps/`, without extension.
    pub map: String,
    #[serde(default)]
    pub seed: u64,
    pub player: Placement,
    #[serde(default)]
    pub entities: Vec<Placement>,
    /// Starting consumables as `(kind, charges)`.
    #[serde(default)]
    pub inventory: Vec<(ConsumableKind, u32)>,
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in scenario {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}
