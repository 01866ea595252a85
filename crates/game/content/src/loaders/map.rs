//! Map data loader.
//!
//! Maps hold terrain only; entity placement lives in scenario files. A map is
//! either a list of explicit tiles over a default fill or an ASCII layout.

use std::path::Path;

use game_core::{MapDimensions, StaticTile, TerrainKind, WorldGrid};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default = "default_fill")]
    fill: TerrainKind,
    /// Surround the map with walls.
    #[serde(default)]
    border: bool,
    /// (x, y, terrain) overrides applied after the fill.
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>,
    /// (x, y, walkable) flags overriding the terrain default, e.g. for
    /// decorative tiles that should block movement.
    #[serde(default)]
    walkable: Vec<(i32, i32, bool)>,
    /// Row strings; takes precedence over `fill` when present.
    #[serde(default)]
    layout: Option<Vec<String>>,
}

fn default_fill() -> TerrainKind {
    TerrainKind::Floor
}

pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<WorldGrid> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in map {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<WorldGrid> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        anyhow::ensure!(width > 0 && height > 0, "map dimensions must be positive");
        let dimensions = MapDimensions::new(width, height);

        let mut tiles = vec![StaticTile::new(data.fill); dimensions.area()];

        if let Some(rows) = &data.layout {
            anyhow::ensure!(
                rows.len() == height as usize,
                "layout has {} rows, expected {}",
                rows.len(),
                height
            );
            for (y, row) in rows.iter().enumerate() {
                let glyphs: Vec<char> = row.chars().collect();
                anyhow::ensure!(
                    glyphs.len() == width as usize,
                    "layout row {} has {} columns, expected {}",
                    y,
                    glyphs.len(),
                    width
                );
                for (x, glyph) in glyphs.into_iter().enumerate() {
                    tiles[y * width as usize + x] = StaticTile::new(terrain_for(glyph)?);
                }
            }
        }

        if data.border {
            for y in 0..height {
                for x in 0..width {
                    if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                        tiles[(y * width + x) as usize] = StaticTile::new(TerrainKind::Wall);
                    }
                }
            }
        }

        let index = |x: i32, y: i32| -> LoadResult<usize> {
            anyhow::ensure!(
                x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height,
                "tile ({}, {}) lies outside the {}x{} map",
                x,
                y,
                width,
                height
            );
            Ok(y as usize * width as usize + x as usize)
        };
        for (x, y, terrain) in data.tiles {
            tiles[index(x, y)?] = StaticTile::new(terrain);
        }
        for (x, y, walkable) in data.walkable {
            let at = index(x, y)?;
            tiles[at] = StaticTile::with_walkable(tiles[at].terrain(), walkable);
        }

        WorldGrid::from_tiles(dimensions, tiles)
            .ok_or_else(|| anyhow::anyhow!("tile count does not match dimensions"))
    }
}

/// Terrain for an ASCII layout glyph.
fn terrain_for(glyph: char) -> LoadResult<TerrainKind> {
    Ok(match glyph {
        '.' => TerrainKind::Floor,
        ',' => TerrainKind::StoneFloor,
        ':' => TerrainKind::CrackedFloor,
        '"' => TerrainKind::Grass,
        '=' => TerrainKind::Bridge,
        '-' => TerrainKind::ShallowWater,
        '>' => TerrainKind::DownStairs,
        '<' => TerrainKind::UpStairs,
        '^' => TerrainKind::Trap,
        '#' => TerrainKind::Wall,
        '%' => TerrainKind::StoneWall,
        '*' => TerrainKind::CaveWall,
        '~' => TerrainKind::Water,
        '&' => TerrainKind::Lava,
        'I' => TerrainKind::Pillar,
        '_' => TerrainKind::Altar,
        'S' => TerrainKind::Statue,
        other => anyhow::bail!("unknown map glyph {:?}", other),
    })
}
