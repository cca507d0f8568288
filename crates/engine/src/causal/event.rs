use crate::world::block::BlockId;
use crate::world::facing::Facing;
use crate::world::position::{BlockPos, ChunkPos};
use slotmap::new_key_type;

new_key_type! {
    /// Unique handle for a node in the causal graph.
    pub struct EventId;
}

/// A single, atomic change to the world -- the fundamental unit of causality.
#[derive(Debug, Clone)]
pub struct Event {
    pub payload: EventPayload,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// A block was written (placed, replaced, or re-set with new state).
    ///
    /// The write only lands if the cell still holds `old` when it executes,
    /// so `old` is always the real previous block.
    BlockSet {
        pos: BlockPos,
        old: BlockId,
        new: BlockId,
    },

    /// The cell adjacent to `pos` on `face` changed. `face` is `None` when
    /// the source of the change is unknown.
    BlockNotify { pos: BlockPos, face: Option<Facing> },
}

impl EventPayload {
    pub fn pos(&self) -> BlockPos {
        match self {
            EventPayload::BlockSet { pos, .. } | EventPayload::BlockNotify { pos, .. } => *pos,
        }
    }
}

impl Event {
    pub fn block_set(pos: BlockPos, old: BlockId, new: BlockId) -> Self {
        Self {
            payload: EventPayload::BlockSet { pos, old, new },
        }
    }

    pub fn notify(pos: BlockPos, face: Option<Facing>) -> Self {
        Self {
            payload: EventPayload::BlockNotify { pos, face },
        }
    }

    /// The chunk this event primarily affects (used for parallel grouping).
    pub fn chunk(&self) -> ChunkPos {
        self.payload.pos().chunk()
    }
}
