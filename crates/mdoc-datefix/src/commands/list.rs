//! List command implementation

use anyhow::{Context, Result};
use colored::*;
use mdoc_datefix::batch::list_mdoc_files;
use mdoc_datefix::errors::print_warning;
use mdoc_datefix::theme;
use mdoc_datefix::tomo_list::{render_tomo_list, tomo_names};
use std::fs;
use std::path::Path;

/// Write the tilt-series names of `dir` to `output` or stdout
pub fn list_tomograms(dir: &Path, output: Option<&Path>, extension: &str) -> Result<()> {
    let listing = list_mdoc_files(dir, extension)
        .with_context(|| format!("Failed to list '{}'", dir.display()))?;
    for (_, err) in &listing.unreadable {
        print_warning(&format!("{} (left out of the list)", err));
    }

    let names = tomo_names(&listing);
    let body = render_tomo_list(&names);

    match output {
        Some(out) => {
            fs::write(out, body).with_context(|| format!("Failed to write '{}'", out.display()))?;
            eprintln!(
                "{} Wrote {} tilt series to {}",
                theme::success_symbol().green(),
                names.len(),
                out.display()
            );
        }
        None => print!("{}", body),
    }

    Ok(())
}
