//! The `insert` subcommand for the fieldbits binary

use super::{format_word, FieldbitsSubcommandDispatcher};
use anyhow::Result;
use clap::Args;
use fieldbits::{parse_word, BitField, Word};

/// Command line arguments for `fieldbits insert`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct InsertArgs {
    /// The field to insert into, in `high:low` notation.
    #[arg(long, short)]
    field: BitField,

    /// The value to insert. Truncated to the width of the field.
    #[arg(long, value_parser = parse_word, allow_hyphen_values = true)]
    value: Word,

    /// Print the result in hexadecimal.
    #[arg(long, short = 'x')]
    hex: bool,

    /// The word to insert the value into.
    #[arg(value_parser = parse_word, allow_negative_numbers = true, allow_hyphen_values = true)]
    word: Word,
}

impl InsertArgs {
    /// Renders the word with the value inserted into the field.
    fn output(&self) -> String {
        let word = self.field.insert(self.value, self.word);
        tracing::debug!(target: "fieldbits-cli::insert", "Inserted {} into field {}: {:#x} -> {:#x}", self.value, self.field, self.word, word);
        format_word(word, self.hex)
    }
}

impl FieldbitsSubcommandDispatcher for InsertArgs {
    fn dispatch(self) -> Result<()> {
        if !self.field.fits(self.value) && !self.field.fits_signed(self.value) {
            tracing::warn!(target: "fieldbits-cli::insert", "Value {} does not fit in {}; it will be truncated", self.value, self.field);
        }

        println!("{}", self.output());
        Ok(())
    }
}
