//! CLI argument parsing and execution

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, LevelFilter};

use combiner::defaults::{DEFAULT_PREFIX, DEFAULT_START_INDEX};
use combiner::phases::orchestrator::{self, MergeOptions, MergeOutcome};
use combiner::phases::phase5;
use combiner::version;

/// Combine development signature files into one
#[derive(Parser, Debug)]
#[command(name = "combiner")]
#[command(about, long_about = None, disable_version_flag = true)]
#[command(after_help = "for more information visit https://github.com/ffdev-info/combiner")]
pub struct Cli {
    /// Use debug logging
    #[arg(long)]
    debug: bool,

    /// Directory where the signature files are
    #[arg(long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Prefix for custom PUIDs
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_PREFIX, env = "COMBINER_PREFIX")]
    prefix: String,

    /// Integer from which to start the signature index (for DROID copy-paste)
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_START_INDEX,
        env = "COMBINER_START_INDEX"
    )]
    start_index: u64,

    /// Write the merged signature file to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print version information
    #[arg(long)]
    version: bool,
}

impl Cli {
    /// Execute the merge described by the parsed arguments
    pub fn execute(self) -> Result<()> {
        init_logging(self.debug);
        debug!("debug logging is configured");

        if self.version {
            println!("{}", version::version_string());
            return Ok(());
        }

        let Some(path) = self.path else {
            let mut command = Cli::command();
            command.write_help(&mut io::stderr())?;
            return Ok(());
        };

        let options = MergeOptions {
            prefix: self.prefix,
            start_index: self.start_index,
        };
        let report = match orchestrator::execute(&path, &options)? {
            MergeOutcome::Empty => return Ok(()),
            MergeOutcome::Merged(report) => report,
        };

        match self.output {
            Some(output) => phase5::write(&report.document, &output)
                .with_context(|| format!("Failed to write {}", output.display())),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(report.document.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

/// Logs go to stderr so that stdout carries only the merged document.
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .try_init();
}
