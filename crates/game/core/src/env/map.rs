//! Static tile layout (the World Grid).
//!
//! Tiles are immutable after map load; transient occupancy is tracked by the
//! [`EntityRegistry`](crate::state::EntityRegistry) and merged in by
//! [`GameState::is_walkable`](crate::state::GameState::is_walkable).

use std::sync::Arc;

use crate::state::Position;

/// Query outside the grid. Callers treat it as "blocked".
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("position {0} is outside the map")]
pub struct OutOfBounds(pub Position);

impl crate::error::GameError for OutOfBounds {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "OUT_OF_BOUNDS"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Canonical terrain classes for static map tiles.
///
/// Decorative variants only differ in presentation; walkability comes from
/// [`TerrainKind::is_walkable`] unless the map overrides it per tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerrainKind {
    Floor,
    StoneFloor,
    CrackedFloor,
    Grass,
    ShallowWater,
    Bridge,
    DownStairs,
    UpStairs,
    Trap,
    Wall,
    StoneWall,
    CaveWall,
    Water,
    Lava,
    Pillar,
    Altar,
    Statue,
}

impl TerrainKind {
    pub const fn is_walkable(self) -> bool {
        matches!(
            self,
            TerrainKind::Floor
                | TerrainKind::StoneFloor
                | TerrainKind::CrackedFloor
                | TerrainKind::Grass
                | TerrainKind::ShallowWater
                | TerrainKind::Bridge
                | TerrainKind::DownStairs
                | TerrainKind::UpStairs
                | TerrainKind::Trap
        )
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    walkable: bool,
}

impl StaticTile {
    /// Creates a tile whose walkability follows its terrain.
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            walkable: terrain.is_walkable(),
        }
    }

    /// Creates a tile with an explicit walkability override.
    pub const fn with_walkable(terrain: TerrainKind, walkable: bool) -> Self {
        Self { terrain, walkable }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_walkable(self) -> bool {
        self.walkable
    }
}

/// Tile as observed through [`WorldGrid::tile_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub terrain: TerrainKind,
    pub walkable: bool,
}

/// Row-major immutable tile grid.
///
/// Tile storage is shared behind an `Arc` so renderer snapshots can hold the
/// layout without copying it every cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    dimensions: MapDimensions,
    tiles: Arc<[StaticTile]>,
}

impl WorldGrid {
    /// Grid of the given size filled with `fill`.
    pub fn filled(dimensions: MapDimensions, fill: StaticTile) -> Self {
        Self {
            dimensions,
            tiles: vec![fill; dimensions.area()].into(),
        }
    }

    /// Builds a grid from row-major tiles; returns `None` on a size mismatch.
    pub fn from_tiles(dimensions: MapDimensions, tiles: Vec<StaticTile>) -> Option<Self> {
        (tiles.len() == dimensions.area()).then(|| Self {
            dimensions,
            tiles: tiles.into(),
        })
    }

    /// Open floor surrounded by a one-tile wall border.
    pub fn walled(dimensions: MapDimensions) -> Self {
        let mut tiles = vec![StaticTile::new(TerrainKind::Floor); dimensions.area()];
        for y in 0..dimensions.height {
            for x in 0..dimensions.width {
                if x == 0 || y == 0 || x + 1 == dimensions.width || y + 1 == dimensions.height {
                    tiles[(y * dimensions.width + x) as usize] = StaticTile::new(TerrainKind::Wall);
                }
            }
        }
        Self {
            dimensions,
            tiles: tiles.into(),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn tile_at(&self, position: Position) -> Result<Tile, OutOfBounds> {
        let index = self.dimensions.index(position).ok_or(OutOfBounds(position))?;
        let tile = self.tiles[index];
        Ok(Tile {
            position,
            terrain: tile.terrain(),
            walkable: tile.is_walkable(),
        })
    }

    /// Terrain-only walkability; out-of-bounds counts as blocked.
    pub fn is_passable(&self, position: Position) -> bool {
        self.tile_at(position).is_ok_and(|tile| tile.walkable)
    }

    /// Shared handle to the raw row-major tiles.
    pub fn tiles(&self) -> Arc<[StaticTile]> {
        Arc::clone(&self.tiles)
    }
}
