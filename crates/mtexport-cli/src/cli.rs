//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Convert Movable Type blog exports into Hugo content files
#[derive(Parser, Debug)]
#[command(name = "mtexport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write one Markdown file per exported entry
    ///
    /// Entries that cannot be converted are logged and skipped; the rest
    /// are still written.
    ///
    /// Examples:
    ///   mtexport convert -i export.txt
    ///   mtexport convert -i export.txt -o site/content/post --timezone UTC
    ///   mtexport convert -i export.txt -k GALLERY --dry-run
    Convert {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory (default: content)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Time zone DATE fields are read in (default: Asia/Tokyo)
        #[arg(long, env = "MTEXPORT_TIMEZONE")]
        timezone: Option<String>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preview what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed entries as JSON
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Input arguments shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Movable Type export file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Extra key to parse as a multi-line block (repeatable)
    #[arg(short = 'k', long = "multiline-key")]
    pub multiline_keys: Vec<String>,
}
