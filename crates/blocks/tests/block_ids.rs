//! Block kinds, id packing, support table and crop state.

use masonry_blocks::block::{self, BlockCategory, BlockKind, SupportType};
use masonry_blocks::crop::{BeetrootAge, WheatAge};
use masonry_blocks::wall::Wall;
use masonry_engine::state::{self, PackedState, StateError, StateLayout};
use masonry_engine::world::block::BlockId;
use masonry_engine::world::facing::Facing;

#[test]
fn type_ids_are_unique_and_round_trip() {
    for kind in BlockKind::ALL {
        assert_eq!(BlockKind::from_type_id(kind.type_id()), Some(kind));
        assert_eq!(block::kind_of(kind.default_id()), Some(kind));
        assert_eq!(block::state_data(kind.default_id()), 0);
    }
    assert_eq!(BlockKind::Air.default_id(), BlockId::AIR);
    assert_eq!(BlockKind::from_type_id(999), None);
}

#[test]
fn state_width_matches_each_layout() {
    let wall = StateLayout::of::<Wall>().unwrap();
    let wheat = StateLayout::of::<WheatAge>().unwrap();
    let beetroot = StateLayout::of::<BeetrootAge>().unwrap();

    for kind in BlockKind::ALL {
        let expected = match kind.category() {
            BlockCategory::Wall => wall.width(),
            _ if kind == BlockKind::Wheat => wheat.width(),
            _ if kind == BlockKind::Beetroots => beetroot.width(),
            _ => 0,
        };
        assert_eq!(kind.state_width(), expected, "{}", kind.name());
    }
}

#[test]
fn support_table() {
    for face in Facing::ALL {
        assert_eq!(block::support_type(block::STONE, face), SupportType::Full);
        assert_eq!(block::support_type(block::AIR, face), SupportType::None);
        assert_eq!(block::support_type(block::GLASS_PANE, face), SupportType::None);
        assert_eq!(block::support_type(block::OAK_FENCE_GATE, face), SupportType::None);
        assert_eq!(block::support_type(block::WHEAT, face), SupportType::None);
    }
    assert_eq!(block::support_type(block::COBBLESTONE_WALL, Facing::Up), SupportType::Center);
    assert_eq!(block::support_type(block::COBBLESTONE_WALL, Facing::Down), SupportType::Center);
    assert_eq!(block::support_type(block::COBBLESTONE_WALL, Facing::East), SupportType::None);
}

#[test]
fn unknown_ids_have_no_behavior() {
    let unknown = BlockId(500 << block::STATE_DATA_BITS);
    assert_eq!(block::kind_of(unknown), None);
    assert_eq!(block::support_type(unknown, Facing::North), SupportType::None);
    assert!(!block::connects_to_wall(unknown, Facing::North));
    assert!(!block::is_wall(unknown));
    assert!(matches!(block::unpack::<Wall>(unknown), Err(StateError::Domain { .. })));
}

#[test]
fn wall_materials_share_a_layout() {
    let mut wall = Wall::new();
    wall.set_post(true);
    for kind in [BlockKind::CobblestoneWall, BlockKind::MossyCobblestoneWall, BlockKind::BrickWall] {
        let id = wall.to_block(kind).unwrap();
        assert_eq!(block::kind_of(id), Some(kind));
        assert_eq!(Wall::from_block(id).unwrap().unwrap(), wall);
    }
    assert!(Wall::from_block(block::STONE).is_none());
    assert!(wall.to_block(BlockKind::Stone).is_err());
}

#[test]
fn stray_state_bits_are_corrupt() {
    // Bit 9 is above the wall's 9-bit layout.
    let id = BlockId(block::COBBLESTONE_WALL.0 | 1 << 9);
    assert!(matches!(Wall::from_block(id), Some(Err(StateError::CorruptState { .. }))));
}

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

#[test]
fn age_is_range_checked() {
    let mut age = WheatAge::new();
    assert!(age.set_age(7).is_ok());
    assert!(matches!(age.set_age(8), Err(StateError::Domain { field: "age", .. })));
    assert_eq!(age.age(), 7);
    assert!(BeetrootAge::with_age(4).is_err());
}

#[test]
fn age_width_ignores_current_value() {
    // Age 1 needs one bit on its own; it must still use the full width.
    let young = StateLayout::from_state(&WheatAge::with_age(1).unwrap()).unwrap();
    let ripe = StateLayout::from_state(&WheatAge::with_age(7).unwrap()).unwrap();
    assert_eq!(young.width(), 3);
    assert_eq!(ripe.width(), 3);
    assert_eq!(StateLayout::of::<BeetrootAge>().unwrap().width(), 2);
}

#[test]
fn crops_grow_until_mature() {
    let mut age = BeetrootAge::new();
    let mut stages = 0;
    while age.grow() {
        stages += 1;
        let id = block::pack(BlockKind::Beetroots, &age).unwrap();
        assert_eq!(block::unpack::<BeetrootAge>(id).unwrap(), age);
    }
    assert_eq!(stages, 3);
    assert!(age.is_mature());
}

#[test]
fn packing_into_the_wrong_kind_is_rejected() {
    let age = WheatAge::with_age(5).unwrap();
    assert!(block::pack(BlockKind::Wheat, &age).is_ok());
    assert!(matches!(block::pack(BlockKind::Beetroots, &age), Err(StateError::Domain { .. })));
}

#[test]
fn age_with_a_raised_minimum() {
    // Sprouts start at stage 2 and ripen at 5.
    type Sprout = masonry_blocks::crop::Age<2, 5>;

    let mut age = Sprout::new();
    assert_eq!(age.age(), 2);
    assert_eq!(Sprout::default(), age);
    assert!(matches!(age.set_age(1), Err(StateError::Domain { field: "age", .. })));
    assert!(age.set_age(5).is_ok());
    assert!(Sprout::with_age(6).is_err());

    let layout = StateLayout::of::<Sprout>().unwrap();
    assert_eq!(layout.width(), 2);
    // Stored as an offset from the minimum.
    assert_eq!(state::encode(&Sprout::new()).unwrap().bits, 0);
    assert_eq!(state::encode(&Sprout::with_age(5).unwrap()).unwrap().bits, 3);
    assert_eq!(state::decode::<Sprout>(PackedState::new(1, 2)).unwrap().age(), 3);
}
