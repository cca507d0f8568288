//! Packed block state.
//!
//! Block types declare their variable state through [`DescribeState`]; the
//! functions here run that description in either direction and measure the
//! resulting layout.

pub mod connections;
pub mod describer;
pub mod error;
pub mod field;

pub use connections::{ConnectionSet, ConnectionType};
pub use describer::{DescribeMode, DescribeState, MAX_STATE_BITS, PackedState, StateDescriber};
pub use error::{Result, StateError};
pub use field::{Field, FieldKind, bits_needed};

/// Pack `state` into a single integer.
pub fn encode<T: DescribeState + Clone>(state: &T) -> Result<PackedState> {
    // Describing takes `&mut`; work on a copy so encoding stays a read.
    let mut scratch = state.clone();
    let mut describer = StateDescriber::serializer();
    scratch.describe_state(&mut describer)?;
    Ok(describer.finish())
}

/// Rebuild a state from its packed form.
///
/// Fails only when `packed.width` disagrees with the layout: too few bits to
/// read every field, or bits left over once every field has been read.
pub fn decode<T: DescribeState + Default>(packed: PackedState) -> Result<T> {
    let mut state = T::default();
    let mut describer = StateDescriber::deserializer(packed);
    state.describe_state(&mut describer)?;

    let consumed = describer.offset();
    let stray = packed.width < MAX_STATE_BITS && packed.bits >> packed.width != 0;
    if consumed != packed.width || stray {
        return Err(StateError::CorruptState {
            needed: consumed,
            available: packed.width.max(u64::BITS - packed.bits.leading_zeros()),
        });
    }
    Ok(state)
}

/// The ordered field list of a state type and its total width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    fields: Vec<Field>,
    width: u32,
}

impl StateLayout {
    /// Layout of a type, measured on its default value.
    pub fn of<T: DescribeState + Default + Clone>() -> Result<Self> {
        Self::from_state(&T::default())
    }

    /// Layout as visited while encoding `state`.
    pub fn from_state<T: DescribeState + Clone>(state: &T) -> Result<Self> {
        let mut scratch = state.clone();
        let mut describer = StateDescriber::serializer();
        scratch.describe_state(&mut describer)?;
        let width = describer.offset();
        Ok(Self {
            fields: describer.into_fields(),
            width,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bit offset of the named field, if the layout has it.
    pub fn offset_of(&self, name: &str) -> Option<u32> {
        let mut offset = 0;
        for field in &self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.bit_width();
        }
        None
    }
}
