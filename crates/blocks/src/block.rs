//! Block kinds, their categories, and the support each face offers.
//!
//! A world `BlockId` carries the kind's type id in the bits above
//! `STATE_DATA_BITS` and the kind's packed state below them, so the engine can
//! store it without knowing anything about walls or crops.

use masonry_engine::state::{self, DescribeState, PackedState, Result, StateError};
use masonry_engine::world::block::BlockId;
use masonry_engine::world::facing::{Axis, Facing};

/// Low bits of a `BlockId` reserved for packed state.
pub const STATE_DATA_BITS: u32 = 16;
const STATE_DATA_MASK: u32 = (1 << STATE_DATA_BITS) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Air,
    Stone,
    Dirt,
    Bedrock,
    OakPlanks,
    CobblestoneWall,
    MossyCobblestoneWall,
    BrickWall,
    OakFenceGate,
    GlassPane,
    IronBars,
    Wheat,
    Beetroots,
}

impl BlockKind {
    pub const ALL: [BlockKind; 13] = [
        BlockKind::Air,
        BlockKind::Stone,
        BlockKind::Dirt,
        BlockKind::Bedrock,
        BlockKind::OakPlanks,
        BlockKind::CobblestoneWall,
        BlockKind::MossyCobblestoneWall,
        BlockKind::BrickWall,
        BlockKind::OakFenceGate,
        BlockKind::GlassPane,
        BlockKind::IronBars,
        BlockKind::Wheat,
        BlockKind::Beetroots,
    ];

    /// Stable type id. Never renumber: it is part of every stored `BlockId`.
    pub const fn type_id(self) -> u16 {
        match self {
            BlockKind::Air => 0,
            BlockKind::Stone => 1,
            BlockKind::Dirt => 2,
            BlockKind::Bedrock => 3,
            BlockKind::OakPlanks => 4,
            BlockKind::CobblestoneWall => 16,
            BlockKind::MossyCobblestoneWall => 17,
            BlockKind::BrickWall => 18,
            BlockKind::OakFenceGate => 32,
            BlockKind::GlassPane => 48,
            BlockKind::IronBars => 49,
            BlockKind::Wheat => 64,
            BlockKind::Beetroots => 65,
        }
    }

    pub fn from_type_id(id: u16) -> Option<BlockKind> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::Air => "air",
            BlockKind::Stone => "stone",
            BlockKind::Dirt => "dirt",
            BlockKind::Bedrock => "bedrock",
            BlockKind::OakPlanks => "oak_planks",
            BlockKind::CobblestoneWall => "cobblestone_wall",
            BlockKind::MossyCobblestoneWall => "mossy_cobblestone_wall",
            BlockKind::BrickWall => "brick_wall",
            BlockKind::OakFenceGate => "oak_fence_gate",
            BlockKind::GlassPane => "glass_pane",
            BlockKind::IronBars => "iron_bars",
            BlockKind::Wheat => "wheat",
            BlockKind::Beetroots => "beetroots",
        }
    }

    pub const fn category(self) -> BlockCategory {
        match self {
            BlockKind::Air => BlockCategory::Air,
            BlockKind::Stone | BlockKind::Dirt | BlockKind::Bedrock | BlockKind::OakPlanks => {
                BlockCategory::Solid
            }
            BlockKind::CobblestoneWall | BlockKind::MossyCobblestoneWall | BlockKind::BrickWall => {
                BlockCategory::Wall
            }
            BlockKind::OakFenceGate => BlockCategory::FenceGate,
            BlockKind::GlassPane | BlockKind::IronBars => BlockCategory::Thin,
            BlockKind::Wheat | BlockKind::Beetroots => BlockCategory::Crop,
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self.category(), BlockCategory::Wall)
    }

    /// Width of the packed state this kind stores in its `BlockId`.
    ///
    /// Must equal the width of the kind's `StateLayout`; the block tests check
    /// every kind.
    pub const fn state_width(self) -> u32 {
        match self {
            // connections (4 x 2 bits) + post
            BlockKind::CobblestoneWall | BlockKind::MossyCobblestoneWall | BlockKind::BrickWall => 9,
            // age 0..=7
            BlockKind::Wheat => 3,
            // age 0..=3
            BlockKind::Beetroots => 2,
            _ => 0,
        }
    }

    /// The id of this kind with all-zero state.
    pub const fn default_id(self) -> BlockId {
        BlockId((self.type_id() as u32) << STATE_DATA_BITS)
    }
}

/// Broad behavior classes. Connectivity asks about categories, never about
/// specific kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    Air,
    /// Full cube.
    Solid,
    Wall,
    FenceGate,
    /// Thin panels: glass panes, bars.
    Thin,
    Crop,
}

/// How much of a face can hold up something attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportType {
    None,
    Center,
    Full,
}

impl BlockCategory {
    pub const fn support_type(self, face: Facing) -> SupportType {
        match self {
            BlockCategory::Solid => SupportType::Full,
            BlockCategory::Wall => match face.axis() {
                Axis::Y => SupportType::Center,
                Axis::X | Axis::Z => SupportType::None,
            },
            BlockCategory::Air | BlockCategory::FenceGate | BlockCategory::Thin | BlockCategory::Crop => {
                SupportType::None
            }
        }
    }
}

pub const AIR: BlockId = BlockId::AIR;
pub const STONE: BlockId = BlockKind::Stone.default_id();
pub const DIRT: BlockId = BlockKind::Dirt.default_id();
pub const BEDROCK: BlockId = BlockKind::Bedrock.default_id();
pub const OAK_PLANKS: BlockId = BlockKind::OakPlanks.default_id();
pub const COBBLESTONE_WALL: BlockId = BlockKind::CobblestoneWall.default_id();
pub const MOSSY_COBBLESTONE_WALL: BlockId = BlockKind::MossyCobblestoneWall.default_id();
pub const BRICK_WALL: BlockId = BlockKind::BrickWall.default_id();
pub const OAK_FENCE_GATE: BlockId = BlockKind::OakFenceGate.default_id();
pub const GLASS_PANE: BlockId = BlockKind::GlassPane.default_id();
pub const IRON_BARS: BlockId = BlockKind::IronBars.default_id();
pub const WHEAT: BlockId = BlockKind::Wheat.default_id();
pub const BEETROOTS: BlockId = BlockKind::Beetroots.default_id();

/// The kind stored in `id`, or `None` for an unregistered type id.
pub fn kind_of(id: BlockId) -> Option<BlockKind> {
    BlockKind::from_type_id((id.0 >> STATE_DATA_BITS) as u16)
}

/// The packed state bits of `id`.
pub const fn state_data(id: BlockId) -> u32 {
    id.0 & STATE_DATA_MASK
}

pub fn category_of(id: BlockId) -> Option<BlockCategory> {
    kind_of(id).map(BlockKind::category)
}

pub fn is_wall(id: BlockId) -> bool {
    kind_of(id).is_some_and(BlockKind::is_wall)
}

/// Support offered by `id` on its `face`. Unknown blocks offer none.
pub fn support_type(id: BlockId, face: Facing) -> SupportType {
    category_of(id).map_or(SupportType::None, |category| category.support_type(face))
}

/// Whether a wall links to `neighbor`, found on the wall's `face`.
///
/// Walls link to other walls of any material, fence gates, thin panels, and
/// anything presenting a full face back toward the wall.
pub fn connects_to_wall(neighbor: BlockId, face: Facing) -> bool {
    match category_of(neighbor) {
        Some(BlockCategory::Wall | BlockCategory::FenceGate | BlockCategory::Thin) => true,
        _ => support_type(neighbor, face.opposite()) == SupportType::Full,
    }
}

/// Encode `state` as a block of `kind`.
pub fn pack<T: DescribeState + Clone>(kind: BlockKind, state: &T) -> Result<BlockId> {
    let packed = state::encode(state)?;
    if packed.width != kind.state_width() {
        return Err(StateError::domain(
            kind.name(),
            format!("state packs to {} bits, kind stores {}", packed.width, kind.state_width()),
        ));
    }
    // width <= state_width <= STATE_DATA_BITS, so the bits fit the mask.
    Ok(BlockId(kind.default_id().0 | (packed.bits as u32 & STATE_DATA_MASK)))
}

/// Decode the state stored in `id`.
pub fn unpack<T: DescribeState + Default>(id: BlockId) -> Result<T> {
    let kind = kind_of(id)
        .ok_or_else(|| StateError::domain("block", format!("unknown type id in {:#x}", id.0)))?;
    state::decode(PackedState::new(u64::from(state_data(id)), kind.state_width()))
}
