use super::facing::Facing;
use super::position::BlockPos;
use serde::Serialize;

/// Axis-aligned box. Block shapes are expressed in block-local units, where
/// the full cell is `[0, 1]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Aabb {
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self { min_x, min_y, min_z, max_x, max_y, max_z }
    }

    /// The full unit cell.
    pub const fn one() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }

    /// Push the side on `face` outward by `distance` (inward when negative).
    pub fn extend(mut self, face: Facing, distance: f64) -> Self {
        match face {
            Facing::Down => self.min_y -= distance,
            Facing::Up => self.max_y += distance,
            Facing::North => self.min_z -= distance,
            Facing::South => self.max_z += distance,
            Facing::West => self.min_x -= distance,
            Facing::East => self.max_x += distance,
        }
        self
    }

    /// Pull the side on `face` inward by `distance`.
    pub fn trim(self, face: Facing, distance: f64) -> Self {
        self.extend(face, -distance)
    }

    /// Move a block-local box to world coordinates.
    pub fn offset(self, pos: BlockPos) -> Self {
        let (x, y, z) = (pos.x as f64, pos.y as f64, pos.z as f64);
        Self::new(
            self.min_x + x,
            self.min_y + y,
            self.min_z + z,
            self.max_x + x,
            self.max_y + y,
            self.max_z + z,
        )
    }

    /// Strict overlap test; boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
            && self.min_z < other.max_z
            && self.max_z > other.min_z
    }

    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x)
            && (self.min_y..=self.max_y).contains(&y)
            && (self.min_z..=self.max_z).contains(&z)
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
