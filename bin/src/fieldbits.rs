//! The `fieldbits` command line tool.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use subcommands::{FieldbitsSubcommand, FieldbitsSubcommandDispatcher};
use tracing::Level;

mod subcommands;

/// Extract, insert and sign extend bit fields within integer words.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Verbosity level (0-3). Logs are written to stderr.
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbosity: u8,

    /// The subcommand to run.
    #[command(subcommand)]
    subcommand: FieldbitsSubcommand,
}

fn main() -> Result<()> {
    let Args { verbosity, subcommand } = Args::parse();
    init_tracing_subscriber(verbosity)?;
    subcommand.dispatch()
}

/// Initializes the global tracing subscriber at a level derived from the verbosity count.
fn init_tracing_subscriber(verbosity: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))
}
