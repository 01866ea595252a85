use std::fmt;

/// Stable identifier for any entity tracked by the registry.
///
/// Identifiers are allocated monotonically and never reused, so a stale id
/// always resolves to `NotFound` instead of aliasing a newer entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// King-move distance; adjacency (including diagonals) is distance 1.
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when `other` lies on one of the eight compass lines through `self`.
    pub fn is_aligned_with(self, other: Position) -> bool {
        self.x == other.x
            || self.y == other.y
            || self.x.abs_diff(other.x) == self.y.abs_diff(other.y)
    }

    /// Squared euclidean distance, kept integral for deterministic comparisons.
    pub fn distance_squared(self, other: Position) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// True when `other` lies within the euclidean `radius` of this position.
    pub fn within_radius(self, other: Position, radius: u32) -> bool {
        self.distance_squared(other) <= u64::from(radius) * u64::from(radius)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Eight-way grid direction.
///
/// Coordinate system: Y grows downward (south), X grows rightward (east),
/// matching row-major map layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// All eight directions in clockwise order starting north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Returns the offset (dx, dy) for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction whose offset matches the signs of `(dx, dy)`; `None` for zero.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        let direction = match (dx.signum(), dy.signum()) {
            (0, -1) => Direction::North,
            (0, 1) => Direction::South,
            (1, 0) => Direction::East,
            (-1, 0) => Direction::West,
            (1, -1) => Direction::NorthEast,
            (-1, -1) => Direction::NorthWest,
            (1, 1) => Direction::SouthEast,
            (-1, 1) => Direction::SouthWest,
            _ => return None,
        };
        Some(direction)
    }

    /// Direction pointing from `from` toward `to`, by sign of each axis.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        Self::from_delta(to.x - from.x, to.y - from.y)
    }
}

/// Simulated game time in milliseconds.
///
/// The clock only advances in `RealTimeTick`, one quantum at a time; it has no
/// relation to wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::AddAssign<u64> for Tick {
    fn add_assign(&mut self, rhs: u64) {
        self.0 = self.0.saturating_add(rhs);
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Integer resource meter clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Removes up to `amount`, returning the new current value.
    pub fn drain(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Restores up to `amount`, returning how much was actually recovered.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_never_leaves_bounds() {
        let mut meter = ResourceMeter::new(50, 30);
        assert_eq!(meter.current(), 30);

        assert_eq!(meter.drain(100), 0);
        assert!(meter.is_empty());

        assert_eq!(meter.restore(12), 12);
        assert_eq!(meter.restore(100), 18);
        assert!(meter.is_full());
    }

    #[test]
    fn direction_from_delta_uses_signs() {
        assert_eq!(Direction::from_delta(5, 0), Some(Direction::East));
        assert_eq!(Direction::from_delta(-3, 7), Some(Direction::SouthWest));
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn alignment_covers_axes_and_diagonals_only() {
        let origin = Position::new(5, 5);
        assert!(origin.is_aligned_with(Position::new(5, 0)));
        assert!(origin.is_aligned_with(Position::new(1, 9)));
        assert!(!origin.is_aligned_with(Position::new(9, 6)));
    }

    #[test]
    fn euclidean_radius_is_inclusive() {
        let center = Position::new(5, 5);
        assert!(center.within_radius(Position::new(7, 5), 2));
        assert!(!center.within_radius(Position::new(7, 6), 2));
        assert_eq!(center.chebyshev(Position::new(7, 6)), 2);
    }
}
