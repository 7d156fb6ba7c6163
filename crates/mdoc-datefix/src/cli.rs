//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdocfix")]
#[command(about = "Propagate the header date of tilt-series MDOC files into every DateTime field", long_about = None)]
#[command(after_help = "Use 'mdocfix <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./.mdocfix.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Label of the per-image timestamp field
    #[arg(long, global = true)]
    pub marker: Option<String>,

    /// Extension of MDOC files
    #[arg(long, global = true)]
    pub extension: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite every MDOC file in a directory
    ///
    /// By default the directory is renamed aside (DIR -> DIR_original) and the
    /// rewritten files are written to a fresh DIR.
    #[command(visible_alias = "batch")]
    Fix {
        /// Directory containing .mdoc files
        dir: PathBuf,

        /// Write into this directory and leave the input in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suffix for the relocated input directory
        #[arg(long)]
        backup_suffix: Option<String>,

        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Show per-file details
        #[arg(short, long)]
        verbose: bool,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Rewrite a single MDOC file
    File {
        /// Path to the .mdoc file
        path: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report header date and DateTime consistency without writing anything
    #[command(visible_alias = "check")]
    Inspect {
        /// MDOC files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Write the tilt-series names found in a directory
    #[command(visible_alias = "ls")]
    List {
        /// Directory containing .mdoc files
        dir: PathBuf,

        /// Output file (defaults to stdout, conventionally tomo_list.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
