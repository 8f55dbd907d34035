//! wikipub CLI - Markdown preprocessing for Confluence publishing.
//!
//! Provides commands for:
//! - `filter`: Remove skip spans from a Markdown file
//! - `check`: Validate skip markers across Markdown files

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FilterArgs};
use output::Output;

/// wikipub - Markdown preprocessing for Confluence publishing.
#[derive(Parser)]
#[command(name = "wikipub", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove skip spans from a Markdown file.
    Filter(FilterArgs),
    /// Validate skip markers in Markdown files.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Filter(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.fatal(&err);
            ExitCode::FAILURE
        }
    }
}
