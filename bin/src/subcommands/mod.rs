//! Subcommands for the `fieldbits` binary

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use fieldbits::{parse_word, UWord, Word};

mod extract;
mod insert;
mod layout;
mod sign_extend;

pub(crate) trait FieldbitsSubcommandDispatcher {
    /// Dispatches the subcommand
    fn dispatch(self) -> Result<()>;
}

/// The subcommands for the `fieldbits` binary
#[derive(Subcommand, Debug)]
pub(crate) enum FieldbitsSubcommand {
    /// Extract a bit field from a word
    Extract(extract::ExtractArgs),
    /// Insert a value into a bit field of a word
    Insert(insert::InsertArgs),
    /// Sign extend the low bits of a value
    SignExtend(sign_extend::SignExtendArgs),
    /// Decode every field of a word according to a JSON layout
    Decode(layout::DecodeArgs),
    /// Encode named field values into a word according to a JSON layout
    Encode(layout::EncodeArgs),
}

impl FieldbitsSubcommandDispatcher for FieldbitsSubcommand {
    fn dispatch(self) -> Result<()> {
        match self {
            FieldbitsSubcommand::Extract(args) => args.dispatch(),
            FieldbitsSubcommand::Insert(args) => args.dispatch(),
            FieldbitsSubcommand::SignExtend(args) => args.dispatch(),
            FieldbitsSubcommand::Decode(args) => args.dispatch(),
            FieldbitsSubcommand::Encode(args) => args.dispatch(),
        }
    }
}

/// Formats a signed [Word] in decimal, or in sign-magnitude hexadecimal if `hex` is set.
pub(crate) fn format_word(value: Word, hex: bool) -> String {
    match (hex, value < 0) {
        (false, _) => value.to_string(),
        (true, false) => format!("{:#x}", value),
        (true, true) => format!("-{:#x}", value.unsigned_abs()),
    }
}

/// Formats an unsigned field value in decimal, or in hexadecimal if `hex` is set.
pub(crate) fn format_uword(value: UWord, hex: bool) -> String {
    if hex {
        format!("{:#x}", value)
    } else {
        value.to_string()
    }
}

/// Parses a `name=value` field assignment.
pub(crate) fn parse_assignment(s: &str) -> Result<(String, Word)> {
    let (name, value) =
        s.split_once('=').ok_or_else(|| anyhow!("Expected `name=value`, got {:?}", s))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing field name in {:?}", s);
    }
    Ok((name.to_string(), parse_word(value)?))
}
