//! # Combiner CLI
//!
//! This is the binary entry point for the `combiner` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Running the merge and writing the merged signature file.
//!
//! The merge itself is defined in the `lib.rs` library crate, ensuring that
//! the binary is a thin wrapper around the reusable library functionality.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
