//! Fix command implementation

use crate::cli::Format;
use anyhow::{Context, Result};
use colored::*;
use mdoc_datefix::batch::{plan_batch, run_batch, BatchOptions, BatchSummary, FileStatus};
use mdoc_datefix::errors::print_warning;
use mdoc_datefix::theme;
use std::path::Path;

/// Rewrite a whole directory of MDOC files
pub fn fix_directory(dir: &Path, opts: &BatchOptions, verbose: bool, format: Format) -> Result<()> {
    let plan = plan_batch(dir, opts)
        .with_context(|| format!("Cannot process '{}'", dir.display()))?;

    if plan.is_empty() {
        match format {
            Format::Json => {
                let summary = BatchSummary {
                    output_dir: plan.output_dir,
                    source_dir: plan.input_dir,
                    dry_run: opts.dry_run,
                    files: Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Format::Text => println!(
                "{} No .{} files found in {}",
                theme::warning_symbol().yellow(),
                opts.extension,
                dir.display()
            ),
        }
        return Ok(());
    }

    if format == Format::Text {
        let header =
            if opts.dry_run { "Dry run: nothing will be written" } else { "Fixing MDOC dates..." };
        println!("\n{}\n", header.bold());

        if plan.relocate && !opts.dry_run {
            println!(
                "  {} Moving {} aside to {}",
                theme::info_symbol().cyan(),
                plan.input_dir.display(),
                plan.source_dir.display()
            );
        }
    }

    let summary = run_batch(plan, opts).context("Batch aborted")?;

    // Warnings go to stderr so JSON on stdout stays parseable
    for file in &summary.files {
        for warning in file.warnings(&summary.source_dir) {
            print_warning(&warning.to_string());
        }
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Text => print_summary(&summary, verbose),
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary, verbose: bool) {
    let rewritten: Vec<_> = summary.rewritten().collect();
    let passed: Vec<_> = summary.passed_through().collect();
    let failed: Vec<_> = summary.failed().collect();

    if !rewritten.is_empty() {
        println!("\n{}", "Rewritten:".green().bold());
        for file in &rewritten {
            if let FileStatus::Rewritten(report) = &file.status {
                let date = report.canonical_date.as_ref().map(|d| d.as_str()).unwrap_or_default();
                if verbose {
                    println!(
                        "  {} {} - {} ({} DateTime lines, {} changed)",
                        theme::success_symbol().green(),
                        file.name,
                        theme::date(date),
                        report.datetime_lines,
                        report.changed_lines
                    );
                } else {
                    println!("  {} {} - {}", theme::success_symbol().green(), file.name, date);
                }
            }
        }
    }

    if !passed.is_empty() {
        println!("\n{}", "Passed through (no header date):".yellow().bold());
        for file in &passed {
            println!("  {} {}", theme::warning_symbol().yellow(), file.name);
        }
    }

    if !failed.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for file in &failed {
            if let FileStatus::Failed(err) = &file.status {
                let cause = std::error::Error::source(err)
                    .map(|c| format!(": {}", c))
                    .unwrap_or_default();
                println!("  {} {}{}", theme::error_symbol().red(), err, cause);
            }
        }
    }

    let verb = if summary.dry_run { "would be written to" } else { "written to" };
    println!(
        "\n{} {} rewritten, {} passed through, {} failed; {} {}\n",
        theme::success_symbol().green().bold(),
        rewritten.len(),
        passed.len(),
        failed.len(),
        verb,
        summary.output_dir.display()
    );
}
