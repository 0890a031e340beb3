//! This module contains the type aliases and constants used within this crate.

/// A [Word] is the signed, caller-facing integer that fields are read from and written into.
///
/// Negative words are accepted; their two's-complement bit pattern is what fields address.
pub type Word = i128;

/// An unsigned [Word], used for raw extracted field values.
pub type UWord = u128;

/// A bit position within a [Word], where `0` is the least significant bit.
pub type BitIndex = u32;

/// The number of bits in a [Word].
pub const WORD_BITS: BitIndex = Word::BITS;

/// The highest bit index a [crate::BitField] may address.
pub const MAX_BIT_INDEX: BitIndex = WORD_BITS - 1;
