//! Command-line entry point for the USFM to Markdown converter.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
