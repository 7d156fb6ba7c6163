//! Inspect command implementation

use crate::cli::Format;
use anyhow::{Context, Result};
use colored::*;
use mdoc_datefix::batch::{list_mdoc_files, process_file};
use mdoc_datefix::rewrite::RewriteReport;
use mdoc_datefix::theme;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct Inspection {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<RewriteReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Expand directories into the MDOC files they contain
fn collect_targets(paths: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            let listing = list_mdoc_files(path, extension)
                .with_context(|| format!("Failed to list '{}'", path.display()))?;
            let mut names: Vec<_> = listing
                .files
                .into_iter()
                .chain(listing.unreadable.into_iter().map(|(name, _)| name))
                .collect();
            names.sort();
            targets.extend(names.into_iter().map(|name| path.join(name)));
        } else {
            targets.push(path.clone());
        }
    }
    Ok(targets)
}

fn inspect_one(path: &Path, marker: &str) -> Inspection {
    match process_file(path, None, marker) {
        Ok(report) => Inspection { path: path.to_path_buf(), report: Some(report), error: None },
        Err(e) => {
            let cause = std::error::Error::source(&e).map(|c| format!(": {}", c)).unwrap_or_default();
            Inspection { path: path.to_path_buf(), report: None, error: Some(format!("{}{}", e, cause)) }
        }
    }
}

/// Report header dates and DateTime consistency without writing anything
pub fn inspect_paths(paths: &[PathBuf], marker: &str, extension: &str, format: Format) -> Result<()> {
    let targets = collect_targets(paths, extension)?;
    let inspections: Vec<Inspection> = targets.iter().map(|p| inspect_one(p, marker)).collect();

    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&inspections)?);
        }
        Format::Text => {
            for inspection in &inspections {
                print_inspection(inspection);
            }
        }
    }

    Ok(())
}

fn print_inspection(inspection: &Inspection) {
    println!("{}", inspection.path.display().to_string().bold());

    let report = match (&inspection.report, &inspection.error) {
        (Some(report), _) => report,
        (None, Some(err)) => {
            println!("  {} {}\n", theme::error_symbol().red(), theme::error(err));
            return;
        }
        (None, None) => return,
    };

    match (&report.canonical_date, report.header_line, &report.header_token) {
        (Some(date), Some(line), Some(token)) => {
            println!(
                "  Header date:    {} (line {}, written as {})",
                theme::date(date.as_str()),
                line,
                token
            );
        }
        _ => println!("  Header date:    {}", theme::warning("none found")),
    }

    println!("  DateTime lines: {}", report.datetime_lines);

    if !report.previous_dates.is_empty() {
        let dates: Vec<&str> = report.previous_dates.iter().map(String::as_str).collect();
        println!("  Dates present:  {}", dates.join(", "));
    }

    if !report.malformed_lines.is_empty() {
        let lines: Vec<String> = report.malformed_lines.iter().map(|l| l.to_string()).collect();
        println!("  {} Malformed DateTime lines: {}", theme::warning_symbol().yellow(), lines.join(", "));
    }

    if !report.found_header() {
        println!();
        return;
    }
    let (symbol, label) = theme::consistency(report.is_consistent());
    if report.changed_lines == 0 {
        println!("  {} {}\n", symbol, label);
    } else {
        println!("  {} {} ({} line(s) would change)\n", symbol, label, report.changed_lines);
    }
}
