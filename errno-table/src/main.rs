//! Print errno lookup-table initializers generated from `errno --list`.
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use errno_table::{CommandSource, Emitter, LogConfig, init_logging};
use std::io::{self, BufWriter};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "errno-table",
    version,
    about = "Print `{ id ,{ \"NAME\", \"description\" } },` lines for every code listed by `errno --list`"
)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env("warn").with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _logging_guards = init_logging(&log_config)?;

    let source = CommandSource::default();
    let emitter = Emitter::new(&source);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = emitter
        .emit(&mut out)
        .with_context(|| format!("failed to list error codes with `{}`", source.command().program))?;

    info!(emitted = summary.emitted, skipped = summary.skipped, "Done");
    Ok(())
}
