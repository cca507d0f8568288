//! Wall blocks: connection state, neighbor resolution and collision shape.

use masonry_engine::state::{ConnectionSet, ConnectionType, DescribeState, Result, StateDescriber, StateError};
use masonry_engine::world::World;
use masonry_engine::world::block::BlockId;
use masonry_engine::world::facing::Facing;
use masonry_engine::world::position::BlockPos;
use masonry_engine::world::shape::Aabb;

use crate::block::{self, BlockKind};

/// Side inset for faces without a connection.
pub const POST_INSET: f64 = 0.25;
/// Side inset for a straight, uncapped run (no post).
pub const THIN_INSET: f64 = 0.3125;
/// How far a wall rises above its cell.
pub const EXTRA_HEIGHT: f64 = 0.5;

/// Per-instance wall state.
///
/// `post` is set while something occupies the cell above, which keeps the
/// wall drawn with its taller center post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wall {
    connections: ConnectionSet,
    post: bool,
}

impl DescribeState for Wall {
    fn describe_state(&mut self, describer: &mut StateDescriber) -> Result<()> {
        describer.connections("connections", &mut self.connections)?;
        describer.bool("post", &mut self.post)
    }
}

impl Wall {
    pub const fn new() -> Self {
        Self {
            connections: ConnectionSet::new(),
            post: false,
        }
    }

    /// Decode the wall stored in `id`. `None` if `id` is not a wall.
    pub fn from_block(id: BlockId) -> Option<Result<Wall>> {
        block::is_wall(id).then(|| block::unpack(id))
    }

    /// Encode as a block of the wall material `kind`.
    pub fn to_block(&self, kind: BlockKind) -> Result<BlockId> {
        if !kind.is_wall() {
            return Err(StateError::domain(kind.name(), "not a wall kind"));
        }
        block::pack(kind, self)
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    pub fn connection(&self, face: Facing) -> Option<ConnectionType> {
        self.connections.get(face)
    }

    pub fn set_connections(&mut self, connections: ConnectionSet) -> &mut Self {
        self.connections = connections;
        self
    }

    /// Set or clear one side. Only north, east, south and west are accepted.
    pub fn set_connection(&mut self, face: Facing, connection: Option<ConnectionType>) -> Result<&mut Self> {
        self.connections.set(face, connection)?;
        Ok(self)
    }

    pub fn is_post(&self) -> bool {
        self.post
    }

    pub fn set_post(&mut self, post: bool) -> &mut Self {
        self.post = post;
        self
    }

    /// Re-derive the state for one face from the block found there.
    /// Returns the number of changes made (0 or 1).
    ///
    /// The face below is ignored: what a wall stands on never affects it.
    pub fn recalculate_connection(&mut self, neighbor: BlockId, face: Facing) -> u32 {
        if face.is_horizontal() {
            let connectable = block::connects_to_wall(neighbor, face);
            let current = self.connections.contains(face);
            if connectable == current {
                return 0;
            }
            // TODO: choose Tall when the block above the neighbor is also a
            // wall or solid, once tall connections get their own shape.
            let connection = connectable.then_some(ConnectionType::Short);
            self.connections.set(face, connection).map_or(0, |()| 1)
        } else if face == Facing::Up {
            let capped = !neighbor.is_air();
            if capped == self.post {
                return 0;
            }
            self.post = capped;
            1
        } else {
            0
        }
    }

    /// Re-derive every face from the world around `pos`. Returns whether
    /// anything changed; a second call with unchanged neighbors returns false.
    pub fn recalculate_connections(&mut self, world: &World, pos: BlockPos) -> bool {
        let mut changed = 0;
        for face in Facing::ALL {
            if face == Facing::Down {
                continue;
            }
            changed += self.recalculate_connection(world.neighbor(pos, face), face);
        }
        changed > 0
    }

    /// Collision shape in block-local units. Rendering uses the same shape.
    pub fn collision_box(&self) -> Aabb {
        let north = self.connections.contains(Facing::North);
        let south = self.connections.contains(Facing::South);
        let west = self.connections.contains(Facing::West);
        let east = self.connections.contains(Facing::East);

        // Exactly one opposite pair and nothing above: a straight run
        // without a post, drawn thinner.
        let straight = (north && south && !west && !east) || (!north && !south && west && east);
        let inset = if straight && !self.post { THIN_INSET } else { POST_INSET };

        Facing::HORIZONTAL
            .into_iter()
            .fold(Aabb::one().extend(Facing::Up, EXTRA_HEIGHT), |shape, face| {
                if self.connections.contains(face) {
                    shape
                } else {
                    shape.trim(face, inset)
                }
            })
    }
}
