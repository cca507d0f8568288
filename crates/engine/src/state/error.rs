use thiserror::Error;

/// Failures while describing, encoding or decoding packed block state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A value outside the field's declared domain. Never clamped.
    #[error("{field}: {reason}")]
    Domain { field: &'static str, reason: String },

    /// The stored integer does not match the layout's width.
    #[error("Corrupt state: layout needs {needed} bits, stored value carries {available}")]
    CorruptState { needed: u32, available: u32 },

    /// The layout does not fit in the packed integer.
    #[error("Layout overflow: field '{field}' would end at bit {end}")]
    LayoutOverflow { field: &'static str, end: u32 },
}

impl StateError {
    pub fn domain(field: &'static str, reason: impl Into<String>) -> Self {
        StateError::Domain {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias using `StateError`.
pub type Result<T> = std::result::Result<T, StateError>;
