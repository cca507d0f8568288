//! Packed state codec: layouts, bit positions, domain checks, corrupt input.

use masonry_engine::state::{
    self, ConnectionSet, ConnectionType, DescribeMode, DescribeState, FieldKind, PackedState, Result,
    StateDescriber, StateError, StateLayout,
};
use masonry_engine::world::facing::Facing;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A block state touching every field kind: bool, bounded int with a
/// non-zero minimum, connections, bool.
#[derive(Debug, Clone, PartialEq)]
struct Lamp {
    lit: bool,
    level: u32,
    connections: ConnectionSet,
    powered: bool,
}

impl Default for Lamp {
    fn default() -> Self {
        Self {
            lit: false,
            level: 1,
            connections: ConnectionSet::new(),
            powered: false,
        }
    }
}

impl DescribeState for Lamp {
    fn describe_state(&mut self, d: &mut StateDescriber) -> Result<()> {
        d.bool("lit", &mut self.lit)?;
        d.bounded_int("level", 1, 15, &mut self.level)?;
        d.connections("connections", &mut self.connections)?;
        d.bool("powered", &mut self.powered)
    }
}

/// A single bounded int with a range that does not fill its bits.
#[derive(Debug, Clone, Default, PartialEq)]
struct Stage {
    value: u32,
}

impl DescribeState for Stage {
    fn describe_state(&mut self, d: &mut StateDescriber) -> Result<()> {
        d.bounded_int("stage", 0, 4, &mut self.value)
    }
}

fn lamp(lit: bool, level: u32, connections: ConnectionSet, powered: bool) -> Lamp {
    Lamp { lit, level, connections, powered }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn layout_follows_declaration_order() {
    let layout = StateLayout::of::<Lamp>().unwrap();
    let names: Vec<_> = layout.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["lit", "level", "connections", "powered"]);
    assert_eq!(layout.fields()[1].kind, FieldKind::BoundedInt { min: 1, max: 15 });

    assert_eq!(layout.offset_of("lit"), Some(0));
    assert_eq!(layout.offset_of("level"), Some(1));
    assert_eq!(layout.offset_of("connections"), Some(5));
    assert_eq!(layout.offset_of("powered"), Some(13));
    assert_eq!(layout.offset_of("missing"), None);
    assert_eq!(layout.width(), 14);
}

#[test]
fn bounded_int_width_comes_from_the_range() {
    // The smallest and largest values must occupy the same bits.
    let low = StateLayout::from_state(&lamp(false, 1, ConnectionSet::new(), false)).unwrap();
    let high = StateLayout::from_state(&lamp(false, 15, ConnectionSet::new(), false)).unwrap();
    assert_eq!(low, high);

    assert_eq!(FieldKind::BoundedInt { min: 0, max: 7 }.bit_width(), 3);
    assert_eq!(FieldKind::BoundedInt { min: 0, max: 8 }.bit_width(), 4);
    assert_eq!(FieldKind::BoundedInt { min: 5, max: 5 }.bit_width(), 0);
    assert_eq!(state::bits_needed(1), 1);
    assert_eq!(state::bits_needed(u32::MAX), 32);
}

#[test]
fn describer_reports_its_mode() {
    assert_eq!(StateDescriber::serializer().mode(), DescribeMode::Serialize);
    assert_eq!(
        StateDescriber::deserializer(PackedState::new(0, 4)).mode(),
        DescribeMode::Deserialize
    );
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn fields_land_on_their_bits() {
    let lit = state::encode(&lamp(true, 1, ConnectionSet::new(), false)).unwrap();
    assert_eq!(lit, PackedState::new(0b1, 14));

    // level is stored as an offset from its minimum.
    let level = state::encode(&lamp(false, 15, ConnectionSet::new(), false)).unwrap();
    assert_eq!(level.bits, 14 << 1);

    let connections = ConnectionSet::new()
        .with(Facing::North, ConnectionType::Short)
        .unwrap()
        .with(Facing::West, ConnectionType::Tall)
        .unwrap();
    let linked = state::encode(&lamp(false, 1, connections, false)).unwrap();
    // north is the first 2-bit slot, west the last.
    assert_eq!(linked.bits, (0b01 << 5) | (0b10 << 11));

    let powered = state::encode(&lamp(false, 1, ConnectionSet::new(), true)).unwrap();
    assert_eq!(powered.bits, 1 << 13);
}

#[test]
fn round_trips_every_level_and_connection_set() {
    for connections in ConnectionSet::all() {
        for level in 1..=15 {
            let value = lamp(level % 2 == 0, level, connections, level % 3 == 0);
            let packed = state::encode(&value).unwrap();
            assert_eq!(packed.width, 14);
            assert_eq!(state::decode::<Lamp>(packed).unwrap(), value);
        }
    }
}

#[test]
fn out_of_domain_values_are_rejected() {
    for level in [0, 16, u32::MAX] {
        let err = state::encode(&lamp(false, level, ConnectionSet::new(), false)).unwrap_err();
        assert!(matches!(err, StateError::Domain { field: "level", .. }), "{err:?}");
    }
}

#[test]
fn empty_range_is_a_domain_error() {
    #[derive(Debug, Clone, Default)]
    struct Backwards(u32);
    impl DescribeState for Backwards {
        fn describe_state(&mut self, d: &mut StateDescriber) -> Result<()> {
            d.bounded_int("backwards", 3, 2, &mut self.0)
        }
    }
    assert!(matches!(state::encode(&Backwards(2)), Err(StateError::Domain { .. })));
}

#[test]
fn layouts_wider_than_the_integer_overflow() {
    #[derive(Debug, Clone, Default)]
    struct Wide([u32; 3]);
    impl DescribeState for Wide {
        fn describe_state(&mut self, d: &mut StateDescriber) -> Result<()> {
            for value in &mut self.0 {
                d.bounded_int("word", 0, u32::MAX, value)?;
            }
            Ok(())
        }
    }
    assert_eq!(
        state::encode(&Wide::default()),
        Err(StateError::LayoutOverflow { field: "word", end: 96 })
    );
}

#[test]
fn vertical_faces_cannot_hold_connections() {
    let mut set = ConnectionSet::new();
    for face in [Facing::Up, Facing::Down] {
        let err = set.set(face, Some(ConnectionType::Short)).unwrap_err();
        assert!(matches!(err, StateError::Domain { field: "connections", .. }));
    }
    assert!(set.is_empty());
    assert_eq!(set.get(Facing::Up), None);
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn short_stored_value_is_corrupt() {
    let err = state::decode::<Lamp>(PackedState::new(0, 9)).unwrap_err();
    // Fails on the first field that does not fit: connections ends at bit 13.
    assert_eq!(err, StateError::CorruptState { needed: 13, available: 9 });
}

#[test]
fn leftover_bits_are_corrupt() {
    assert!(matches!(
        state::decode::<Lamp>(PackedState::new(0, 20)),
        Err(StateError::CorruptState { needed: 14, .. })
    ));
    // Width matches, but a bit is set above it.
    assert!(matches!(
        state::decode::<Lamp>(PackedState::new(1 << 14, 14)),
        Err(StateError::CorruptState { .. })
    ));
}

#[test]
fn bounded_int_decode_saturates() {
    // stage 0..=4 uses 3 bits; 5, 6 and 7 are not valid offsets.
    for raw in 5..8 {
        let stage = state::decode::<Stage>(PackedState::new(raw, 3)).unwrap();
        assert_eq!(stage.value, 4);
    }
    assert_eq!(state::decode::<Stage>(PackedState::new(3, 3)).unwrap().value, 3);
}

#[test]
fn unassigned_connection_code_reads_as_unconnected() {
    // 0b11 in the north slot.
    let packed = PackedState::new(0b11 << 5, 14);
    let decoded = state::decode::<Lamp>(packed).unwrap();
    assert_eq!(decoded.connections.get(Facing::North), None);
    assert!(decoded.connections.is_empty());
}

#[test]
fn connection_sets_enumerate_without_duplicates() {
    let all: Vec<_> = ConnectionSet::all().collect();
    assert_eq!(all.len(), 81);
    for (i, a) in all.iter().enumerate() {
        assert!(all[i + 1..].iter().all(|b| b != a));
    }
    let full = all.iter().filter(|set| set.len() == 4).count();
    assert_eq!(full, 16);
}
