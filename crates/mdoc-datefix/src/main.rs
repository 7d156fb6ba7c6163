//! MDOC date repair CLI tool

use anyhow::Result;
use clap::Parser;
use mdoc_datefix::batch::BatchOptions;
use mdoc_datefix::config::Config;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match Config::load(cli.config.as_deref(), &cwd) {
        Ok(config) => config.with_overrides(cli.marker.clone(), cli.extension.clone()),
        Err(e) => {
            mdoc_datefix::errors::print_error_with_suggestion(
                "Failed to load configuration",
                &e,
                "Check the keys in .mdocfix.toml: marker, extension, backup_suffix, jobs",
            );
            std::process::exit(1);
        }
    };

    // Execute the command
    let result = match cli.command {
        Commands::Fix { dir, output, backup_suffix, dry_run, jobs, verbose, format } => {
            let opts = BatchOptions {
                marker: config.marker.clone(),
                extension: config.extension.clone(),
                backup_suffix: backup_suffix.unwrap_or(config.backup_suffix),
                output,
                dry_run,
                jobs: jobs.or(config.jobs),
            };
            fix_directory(&dir, &opts, verbose, format)
        }
        Commands::File { path, output } => fix_file(&path, output.as_deref(), &config.marker),
        Commands::Inspect { paths, format } => {
            inspect_paths(&paths, &config.marker, &config.extension, format)
        }
        Commands::List { dir, output } => list_tomograms(&dir, output.as_deref(), &config.extension),
    };

    if let Err(e) = result {
        mdoc_datefix::errors::print_error("Command failed", &e);
        std::process::exit(1);
    }

    Ok(())
}
