//! The `decode` and `encode` subcommands for the fieldbits binary

use super::{format_word, parse_assignment, FieldbitsSubcommandDispatcher};
use anyhow::Result;
use clap::Args;
use fieldbits::{parse_word, Layout, Word};
use std::path::PathBuf;

/// Command line arguments for `fieldbits decode`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct DecodeArgs {
    /// The path to the JSON layout file.
    #[arg(long, short)]
    layout: PathBuf,

    /// The word to decode.
    #[arg(value_parser = parse_word, allow_negative_numbers = true, allow_hyphen_values = true)]
    word: Word,
}

impl FieldbitsSubcommandDispatcher for DecodeArgs {
    fn dispatch(self) -> Result<()> {
        let layout = Layout::from_path(&self.layout)?;
        let decoded = layout.decode(self.word);
        tracing::info!(target: "fieldbits-cli::decode", "Decoded {} fields from {:#x}", decoded.len(), self.word);

        println!("{}", serde_json::to_string_pretty(&decoded)?);
        Ok(())
    }
}

/// Command line arguments for `fieldbits encode`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct EncodeArgs {
    /// The path to the JSON layout file.
    #[arg(long, short)]
    layout: PathBuf,

    /// The word to encode the fields into. Bits not covered by an assignment are kept.
    #[arg(long, short, default_value = "0", value_parser = parse_word, allow_hyphen_values = true)]
    base: Word,

    /// Print the result in hexadecimal.
    #[arg(long, short = 'x')]
    hex: bool,

    /// Field assignments, as `name=value`.
    #[arg(value_parser = parse_assignment, required = true)]
    values: Vec<(String, Word)>,
}

impl FieldbitsSubcommandDispatcher for EncodeArgs {
    fn dispatch(self) -> Result<()> {
        let layout = Layout::from_path(&self.layout)?;
        let word =
            layout.encode(self.values.iter().map(|(name, value)| (name.as_str(), *value)), self.base)?;
        tracing::info!(target: "fieldbits-cli::encode", "Encoded {} fields into {:#x}", self.values.len(), word);

        println!("{}", format_word(word, self.hex));
        Ok(())
    }
}
