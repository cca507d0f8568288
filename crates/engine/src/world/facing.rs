use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The six faces of a block cell.
///
/// North is -Z, south is +Z, west is -X, east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Down,
        Facing::Up,
        Facing::North,
        Facing::South,
        Facing::West,
        Facing::East,
    ];

    /// Horizontal faces in canonical order. Packed layouts that visit every
    /// horizontal face rely on this order never changing.
    pub const HORIZONTAL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub const fn opposite(self) -> Facing {
        match self {
            Facing::Down => Facing::Up,
            Facing::Up => Facing::Down,
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Facing::Down | Facing::Up => Axis::Y,
            Facing::North | Facing::South => Axis::Z,
            Facing::West | Facing::East => Axis::X,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        !matches!(self.axis(), Axis::Y)
    }

    /// True for faces pointing along the positive direction of their axis.
    pub const fn is_positive(self) -> bool {
        matches!(self, Facing::Up | Facing::South | Facing::East)
    }

    /// Unit step `(dx, dy, dz)` toward the adjacent cell on this face.
    pub const fn offset(self) -> (i64, i64, i64) {
        match self {
            Facing::Down => (0, -1, 0),
            Facing::Up => (0, 1, 0),
            Facing::North => (0, 0, -1),
            Facing::South => (0, 0, 1),
            Facing::West => (-1, 0, 0),
            Facing::East => (1, 0, 0),
        }
    }

    /// Index into `HORIZONTAL`, or `None` for up/down.
    pub const fn horizontal_index(self) -> Option<usize> {
        match self {
            Facing::North => Some(0),
            Facing::East => Some(1),
            Facing::South => Some(2),
            Facing::West => Some(3),
            Facing::Down | Facing::Up => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Facing::Down => "down",
            Facing::Up => "up",
            Facing::North => "north",
            Facing::South => "south",
            Facing::West => "west",
            Facing::East => "east",
        }
    }
}
