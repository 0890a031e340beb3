//! The `extract` subcommand for the fieldbits binary

use super::{format_uword, format_word, FieldbitsSubcommandDispatcher};
use anyhow::Result;
use clap::Args;
use fieldbits::{parse_word, BitField, Word};

/// Command line arguments for `fieldbits extract`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct ExtractArgs {
    /// The field to extract, in `high:low` notation.
    #[arg(long, short)]
    field: BitField,

    /// Interpret the field as a two's-complement signed value.
    #[arg(long, short)]
    signed: bool,

    /// Print the result in hexadecimal.
    #[arg(long, short = 'x')]
    hex: bool,

    /// The word to extract the field from.
    #[arg(value_parser = parse_word, allow_negative_numbers = true, allow_hyphen_values = true)]
    word: Word,
}

impl ExtractArgs {
    /// Renders the extracted field value.
    fn output(&self) -> String {
        if self.signed {
            format_word(self.field.extract_signed(self.word), self.hex)
        } else {
            format_uword(self.field.extract(self.word), self.hex)
        }
    }
}

impl FieldbitsSubcommandDispatcher for ExtractArgs {
    fn dispatch(self) -> Result<()> {
        tracing::debug!(target: "fieldbits-cli::extract", "Extracting field {} (signed = {}) from {:#x}", self.field, self.signed, self.word);

        println!("{}", self.output());
        Ok(())
    }
}
