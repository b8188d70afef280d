//! spansplit command-line entry point

use clap::Parser;
use spansplit_cli::commands::Commands;

/// Lossless rule-based tokenizer
#[derive(Debug, Parser)]
#[command(name = "spansplit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
