//! Turns neighbor changes into wall writes.
//!
//! A [`WallNotifier`] wraps one wall read from the world. Resolution that
//! changes anything leaves it `Dirty`; flushing hands the new block back as a
//! `BlockSet` event and returns it to `Stable`. Everything runs synchronously
//! inside the rule that received the notification.

use masonry_engine::causal::event::Event;
use masonry_engine::world::World;
use masonry_engine::world::block::BlockId;
use masonry_engine::world::facing::Facing;
use masonry_engine::world::position::BlockPos;

use crate::block::{self, BlockKind};
use crate::wall::Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierState {
    /// Nothing to write.
    Stable,
    /// The wall changed and has not been handed back to the world yet.
    Dirty,
}

#[derive(Debug)]
pub struct WallNotifier {
    pos: BlockPos,
    kind: BlockKind,
    wall: Wall,
    /// The block as last seen in (or handed to) the world.
    current: BlockId,
    state: NotifierState,
}

impl WallNotifier {
    /// Read the wall at `pos`. `None` when `pos` does not hold a wall.
    ///
    /// A wall whose stored state cannot be decoded starts from the default
    /// state and is marked dirty, so the next flush rewrites it.
    pub fn load(world: &World, pos: BlockPos) -> Option<Self> {
        let current = world.get_block(pos);
        let kind = block::kind_of(current).filter(|kind| kind.is_wall())?;
        let (wall, state) = match block::unpack::<Wall>(current) {
            Ok(wall) => (wall, NotifierState::Stable),
            Err(err) => {
                tracing::warn!("Wall at {:?} has unreadable state ({}), resetting", pos, err);
                (Wall::default(), NotifierState::Dirty)
            }
        };
        Some(Self {
            pos,
            kind,
            wall,
            current,
            state,
        })
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn state(&self) -> NotifierState {
        self.state
    }

    /// The cell on `face` changed. Undirected notifications are ignored.
    pub fn on_neighbor_changed(&mut self, world: &World, face: Option<Facing>) -> Option<Event> {
        if let Some(face) = face {
            let neighbor = world.neighbor(self.pos, face);
            if self.wall.recalculate_connection(neighbor, face) > 0 {
                self.state = NotifierState::Dirty;
            }
        }
        self.flush(world)
    }

    /// Re-derive every face, as after placement or load.
    pub fn refresh(&mut self, world: &World) -> Option<Event> {
        if self.wall.recalculate_connections(world, self.pos) {
            self.state = NotifierState::Dirty;
        }
        self.flush(world)
    }

    /// Hand a dirty wall back as a write. The write expects the block this
    /// notifier was loaded from, so it is dropped if the cell moved on in the
    /// meantime. A wall that cannot be encoded stays dirty.
    fn flush(&mut self, world: &World) -> Option<Event> {
        if self.state == NotifierState::Stable {
            return None;
        }

        let new = match self.wall.to_block(self.kind) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("Cannot encode wall at {:?}, keeping it dirty: {}", self.pos, err);
                return None;
            }
        };
        self.state = NotifierState::Stable;
        if new == self.current || new == world.get_block(self.pos) {
            return None;
        }

        tracing::debug!(
            "Wall at {:?} -> {:?} post={}",
            self.pos,
            self.wall.connections().iter().map(|(face, _)| face.name()).collect::<Vec<_>>(),
            self.wall.is_post()
        );
        let old = std::mem::replace(&mut self.current, new);
        Some(Event::block_set(self.pos, old, new))
    }
}
