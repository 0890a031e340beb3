//! The `sign-extend` subcommand for the fieldbits binary

use super::{format_word, FieldbitsSubcommandDispatcher};
use anyhow::Result;
use clap::Args;
use fieldbits::{parse_word, sign_extend, BitIndex, UWord, Word};

/// Command line arguments for `fieldbits sign-extend`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct SignExtendArgs {
    /// The bit width of the two's-complement value.
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=128))]
    width: BitIndex,

    /// Print the result in hexadecimal.
    #[arg(long, short = 'x')]
    hex: bool,

    /// The value to sign extend. Bits at or above `width` are ignored.
    #[arg(value_parser = parse_word, allow_negative_numbers = true, allow_hyphen_values = true)]
    value: Word,
}

impl SignExtendArgs {
    /// Renders the sign extended value.
    fn output(&self) -> String {
        let extended = sign_extend(self.value as UWord, self.width);
        tracing::debug!(target: "fieldbits-cli::sign-extend", "Sign extended {:#x} from {} bits to {}", self.value, self.width, extended);
        format_word(extended, self.hex)
    }
}

impl FieldbitsSubcommandDispatcher for SignExtendArgs {
    fn dispatch(self) -> Result<()> {
        println!("{}", self.output());
        Ok(())
    }
}
