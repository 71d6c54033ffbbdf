//! mtexport CLI
//!
//! Converts Movable Type blog exports into Hugo content files.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::ConvertArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("Verbose mode enabled");
    execute_command(cli.command)
}

/// Log to stderr; stdout carries the summary or JSON output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Convert {
            source,
            output_dir,
            timezone,
            config,
            dry_run,
            json,
        } => commands::run_convert(&ConvertArgs {
            source,
            output_dir,
            timezone,
            config,
            dry_run,
            json,
        }),
        Commands::Inspect { source } => commands::run_inspect(&source),
    }
}
