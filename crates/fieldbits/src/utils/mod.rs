//! This module contains utility and helper functions for this crate.

use crate::types::{BitIndex, UWord, Word, WORD_BITS};

mod parse;
pub use parse::parse_word;

/// Perform a sign extension of a two's-complement value embedded in the lower `width` bits of
/// `data`.
///
/// Bits of `data` at or above `width` are ignored, so the result is always within
/// `[-2^(width-1), 2^(width-1) - 1]`.
///
/// ### Takes
/// - `data`: The data to sign extend.
/// - `width`: The bit width of the value within `data`. Must be within `1..=128`.
///
/// ### Returns
/// - The sign extended value.
#[inline(always)]
pub fn sign_extend(data: UWord, width: BitIndex) -> Word {
    debug_assert!((1..=WORD_BITS).contains(&width), "width must be within 1..={WORD_BITS}");

    let mask = UWord::MAX >> (WORD_BITS - width);
    let data = data & mask;
    let is_signed = (data >> (width - 1)) & 1 != 0;
    if is_signed {
        (data | !mask) as Word
    } else {
        data as Word
    }
}
