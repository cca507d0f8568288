//! The bidirectional state describer.
//!
//! A block type describes its state once, as an ordered sequence of field
//! calls on a [`StateDescriber`]. The describer's mode decides whether each
//! call copies the field's value into the packed integer or reads it back out,
//! so the write and read layouts come from the same code and cannot drift.

use super::connections::{ConnectionSet, ConnectionType};
use super::error::{Result, StateError};
use super::field::{CONNECTION_BITS_PER_FACE, Field, FieldKind, low_mask};

/// Largest layout the packed integer can hold.
pub const MAX_STATE_BITS: u32 = u64::BITS;

/// Which direction a describer moves values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeMode {
    /// Field values → packed bits.
    Serialize,
    /// Packed bits → field values.
    Deserialize,
}

/// A packed state value together with the number of bits it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedState {
    pub bits: u64,
    pub width: u32,
}

impl PackedState {
    pub const fn new(bits: u64, width: u32) -> Self {
        Self { bits, width }
    }
}

/// Visitor that packs or unpacks fields, least significant bits first, in
/// the order they are described.
#[derive(Debug)]
pub struct StateDescriber {
    mode: DescribeMode,
    bits: u64,
    /// Next free bit.
    offset: u32,
    /// Bits available to read. Unused when serializing.
    available: u32,
    fields: Vec<Field>,
}

impl StateDescriber {
    pub fn serializer() -> Self {
        Self {
            mode: DescribeMode::Serialize,
            bits: 0,
            offset: 0,
            available: MAX_STATE_BITS,
            fields: Vec::new(),
        }
    }

    pub fn deserializer(packed: PackedState) -> Self {
        Self {
            mode: DescribeMode::Deserialize,
            bits: packed.bits,
            offset: 0,
            available: packed.width,
            fields: Vec::new(),
        }
    }

    pub fn mode(&self) -> DescribeMode {
        self.mode
    }

    /// Bits consumed so far.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Fields visited so far, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The packed value written so far.
    pub fn finish(self) -> PackedState {
        PackedState::new(self.bits, self.offset)
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn bool(&mut self, name: &'static str, value: &mut bool) -> Result<()> {
        let mut raw = u64::from(*value);
        self.slot(Field::new(name, FieldKind::Bool), &mut raw)?;
        *value = raw != 0;
        Ok(())
    }

    /// An integer restricted to `min..=max`.
    pub fn bounded_int(&mut self, name: &'static str, min: u32, max: u32, value: &mut u32) -> Result<()> {
        if min > max {
            return Err(StateError::domain(name, format!("empty range {min}..={max}")));
        }
        let field = Field::new(name, FieldKind::BoundedInt { min, max });
        match self.mode {
            DescribeMode::Serialize => {
                if !(min..=max).contains(&*value) {
                    return Err(StateError::domain(
                        name,
                        format!("value {} outside {min}..={max}", *value),
                    ));
                }
                let mut raw = u64::from(*value - min);
                self.slot(field, &mut raw)
            }
            DescribeMode::Deserialize => {
                let mut raw = 0;
                self.slot(field, &mut raw)?;
                let span = u64::from(max - min);
                if raw > span {
                    tracing::warn!("{}: stored offset {} exceeds {}..={}, reading {}", name, raw, min, max, max);
                    raw = span;
                }
                // raw <= max - min, so this fits in u32.
                *value = min + raw as u32;
                Ok(())
            }
        }
    }

    /// A connection slot for each horizontal face, visited north, east,
    /// south, west.
    pub fn connections(&mut self, name: &'static str, set: &mut ConnectionSet) -> Result<()> {
        let mut raw = 0u64;
        for (i, slot) in set.slots().iter().enumerate() {
            raw |= ConnectionType::code(*slot) << (i as u32 * CONNECTION_BITS_PER_FACE);
        }
        self.slot(Field::new(name, FieldKind::Connections), &mut raw)?;
        if self.mode == DescribeMode::Deserialize {
            let mask = low_mask(CONNECTION_BITS_PER_FACE);
            for (i, slot) in set.slots_mut().iter_mut().enumerate() {
                *slot = ConnectionType::from_code((raw >> (i as u32 * CONNECTION_BITS_PER_FACE)) & mask);
            }
        }
        Ok(())
    }

    /// Move one field's raw bits. On serialize `raw` is read and left as is;
    /// on deserialize it is overwritten with the stored bits.
    fn slot(&mut self, field: Field, raw: &mut u64) -> Result<()> {
        let width = field.bit_width();
        let end = self.offset + width;
        if end > MAX_STATE_BITS {
            return Err(StateError::LayoutOverflow { field: field.name, end });
        }
        match self.mode {
            DescribeMode::Serialize => {
                debug_assert!(*raw & !low_mask(width) == 0, "{} does not fit in {} bits", field.name, width);
                if width > 0 {
                    self.bits |= (*raw & low_mask(width)) << self.offset;
                }
            }
            DescribeMode::Deserialize => {
                if end > self.available {
                    return Err(StateError::CorruptState {
                        needed: end,
                        available: self.available,
                    });
                }
                *raw = if width > 0 { (self.bits >> self.offset) & low_mask(width) } else { 0 };
            }
        }
        self.offset = end;
        self.fields.push(field);
        Ok(())
    }
}

/// Implemented by every block state that packs into a `PackedState`.
///
/// `describe_state` must visit the same fields in the same order regardless
/// of the describer's mode or of the current field values.
pub trait DescribeState {
    fn describe_state(&mut self, describer: &mut StateDescriber) -> Result<()>;
}
