use super::facing::Facing;
use serde::{Deserialize, Serialize};

/// Absolute block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The chunk column this block belongs to.
    pub const fn chunk(&self) -> ChunkPos {
        ChunkPos {
            x: (self.x >> 4) as i32,
            z: (self.z >> 4) as i32,
        }
    }

    /// The adjacent cell on `face`.
    pub const fn side(&self, face: Facing) -> BlockPos {
        let (dx, dy, dz) = face.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The six cardinal neighbors, paired with the face of `self` they touch.
    pub fn neighbors(&self) -> [(Facing, BlockPos); 6] {
        Facing::ALL.map(|face| (face, self.side(face)))
    }
}

/// Chunk column position (16x16 blocks horizontally). Used to group work
/// that touches nearby cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}
