//! Field descriptors: one unit of packed state and the bits it occupies.

/// Bits used per horizontal face inside a connection set.
pub const CONNECTION_BITS_PER_FACE: u32 = 2;

/// What kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    /// Inclusive range. Stored as `value - min`.
    BoundedInt { min: u32, max: u32 },
    /// One connection slot per horizontal face.
    Connections,
}

impl FieldKind {
    /// Width in bits. For bounded integers this depends only on the declared
    /// range, so every value of the field packs to the same width.
    pub const fn bit_width(&self) -> u32 {
        match *self {
            FieldKind::Bool => 1,
            FieldKind::BoundedInt { min, max } => bits_needed(max.saturating_sub(min)),
            FieldKind::Connections => 4 * CONNECTION_BITS_PER_FACE,
        }
    }
}

/// A named field in a block type's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub const fn bit_width(&self) -> u32 {
        self.kind.bit_width()
    }
}

/// Minimum number of bits that can hold every integer in `0..=span`.
pub const fn bits_needed(span: u32) -> u32 {
    u32::BITS - span.leading_zeros()
}

/// Mask covering the low `width` bits.
pub(crate) const fn low_mask(width: u32) -> u64 {
    if width >= u64::BITS { u64::MAX } else { (1u64 << width) - 1 }
}
