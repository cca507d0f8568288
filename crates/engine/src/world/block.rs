/// Opaque block identifier. The engine stores these without interpreting them.
///
/// Game layers pack a block kind and that kind's state data into the value;
/// the only meaning the engine itself assigns is that `BlockId::AIR` (0) is an
/// empty cell and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    /// The universal "empty" block.
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}
