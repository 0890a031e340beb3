//! Error types for bit field construction and layouts.

use crate::types::BitIndex;
use std::fmt;

/// A [Result] type over a generic value with [BitFieldError].
pub type BitFieldResult<T> = Result<T, BitFieldError>;

/// An error raised while constructing a [crate::BitField] or a [crate::Layout].
///
/// Extraction and insertion never fail; every variant is produced at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitFieldError {
    /// The low bit index is above the high bit index.
    InvalidRange {
        /// The requested low bit index.
        low: BitIndex,
        /// The requested high bit index.
        high: BitIndex,
    },
    /// A field was requested with a width of zero bits.
    ZeroWidth,
    /// The high bit index lies outside of a [crate::Word].
    OutOfBounds {
        /// The requested high bit index.
        high: BitIndex,
    },
    /// Two fields of a layout share a name.
    DuplicateName(String),
    /// Two fields of a layout share at least one bit.
    Overlap {
        /// The first overlapping field.
        a: String,
        /// The second overlapping field.
        b: String,
    },
    /// A layout has no field with the given name.
    UnknownField(String),
}

impl fmt::Display for BitFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { low, high } => {
                write!(f, "invalid bit range: low ({low}) must not exceed high ({high})")
            }
            Self::ZeroWidth => write!(f, "bit fields must be at least one bit wide"),
            Self::OutOfBounds { high } => write!(
                f,
                "bit index {high} is out of bounds (max {})",
                crate::types::MAX_BIT_INDEX
            ),
            Self::DuplicateName(name) => write!(f, "duplicate field name: {name}"),
            Self::Overlap { a, b } => write!(f, "fields `{a}` and `{b}` overlap"),
            Self::UnknownField(name) => write!(f, "unknown field: {name}"),
        }
    }
}

impl std::error::Error for BitFieldError {}
