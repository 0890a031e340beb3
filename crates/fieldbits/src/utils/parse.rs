//! Parsing of integer word literals.

use crate::types::{UWord, Word};
use anyhow::{bail, Context, Result};

/// Parses a [Word] literal.
///
/// Accepts an optional leading `-`, an optional `0x`, `0o` or `0b` radix prefix and `_` digit
/// separators. Non-negative literals may use all 128 bits; they are reinterpreted as the
/// two's-complement [Word] with the same bit pattern.
pub fn parse_word(input: &str) -> Result<Word> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let lower = rest.to_ascii_lowercase();
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d)
    } else {
        (10, lower.as_str())
    };

    let digits = digits.replace('_', "");
    if digits.is_empty() {
        bail!("Invalid word literal: {:?}", input);
    }
    if digits.starts_with(['+', '-']) {
        bail!("Invalid word literal: {:?}", input);
    }

    if negative {
        Word::from_str_radix(&format!("-{digits}"), radix)
            .with_context(|| format!("Invalid word literal: {:?}", input))
    } else {
        UWord::from_str_radix(&digits, radix)
            .map(|v| v as Word)
            .with_context(|| format!("Invalid word literal: {:?}", input))
    }
}
