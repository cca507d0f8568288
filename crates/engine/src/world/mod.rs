pub mod block;
pub mod facing;
pub mod position;
pub mod shape;

use block::BlockId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use facing::Facing;
use position::BlockPos;

/// The block grid. Thread-safe, lock-sharded by position.
///
/// Only non-air cells are stored; any position never written (or written
/// with AIR) reads back as AIR. Time and causality live in
/// `causal::CausalGraph`, not here.
pub struct World {
    blocks: DashMap<BlockPos, BlockId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            blocks: DashMap::new(),
        }
    }

    /// Read a block at an absolute position.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        self.blocks.get(&pos).map_or(BlockId::AIR, |entry| *entry)
    }

    /// Read the block adjacent to `pos` on `face`.
    pub fn neighbor(&self, pos: BlockPos, face: Facing) -> BlockId {
        self.get_block(pos.side(face))
    }

    /// Write a block and return what was there before.
    ///
    /// Takes `&self` (not `&mut self`) because `DashMap` provides interior
    /// mutability via per-shard locking.
    pub fn set_block(&self, pos: BlockPos, block: BlockId) -> BlockId {
        let previous = if block.is_air() {
            self.blocks.remove(&pos).map(|(_, old)| old)
        } else {
            self.blocks.insert(pos, block)
        };
        previous.unwrap_or(BlockId::AIR)
    }

    /// Write `block` only if the cell still holds `expected`.
    ///
    /// Returns the previous block on success, or the block actually found
    /// when it differs from `expected`. The check and the write happen under
    /// the same shard lock.
    pub fn compare_and_set(&self, pos: BlockPos, expected: BlockId, block: BlockId) -> Result<BlockId, BlockId> {
        match self.blocks.entry(pos) {
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                if current != expected {
                    return Err(current);
                }
                if block.is_air() {
                    entry.remove();
                } else {
                    entry.insert(block);
                }
                Ok(current)
            }
            Entry::Vacant(entry) => {
                if !expected.is_air() {
                    return Err(BlockId::AIR);
                }
                if !block.is_air() {
                    entry.insert(block);
                }
                Ok(BlockId::AIR)
            }
        }
    }

    /// Fill the inclusive box spanned by `from` and `to`.
    pub fn fill(&self, from: BlockPos, to: BlockPos, block: BlockId) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.set_block(BlockPos::new(x, y, z), block);
                }
            }
        }
    }

    /// Number of non-air cells.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Snapshot of every non-air cell, sorted by position.
    pub fn blocks(&self) -> Vec<(BlockPos, BlockId)> {
        let mut out: Vec<_> = self
            .blocks
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        out.sort_unstable_by_key(|(pos, _)| *pos);
        out
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
