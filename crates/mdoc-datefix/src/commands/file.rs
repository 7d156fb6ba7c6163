//! File command implementation

use anyhow::{bail, Context, Result};
use mdoc_datefix::batch::process_file;
use mdoc_datefix::errors::{print_warning, MdocError};
use mdoc_datefix::rewrite::rewrite_lines;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Rewrite one file to `output`, or to stdout when no output is given
pub fn fix_file(path: &Path, output: Option<&Path>, marker: &str) -> Result<()> {
    let report = match output {
        Some(out) => {
            if is_same_file(path, out) {
                bail!("Refusing to overwrite the input file '{}'", path.display());
            }
            process_file(path, Some(out), marker)?
        }
        None => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            let stdout = io::stdout().lock();
            rewrite_lines(BufReader::new(file), stdout, marker)
                .with_context(|| format!("Failed to rewrite '{}'", path.display()))?
        }
    };

    if !report.found_header() {
        print_warning(&MdocError::NoHeaderDateFound { path: path.to_path_buf() }.to_string());
    }
    for line in &report.malformed_lines {
        print_warning(
            &MdocError::MalformedDateTimeLine { path: path.to_path_buf(), line: *line }.to_string(),
        );
    }

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    a == b || matches!((a.canonicalize(), b.canonicalize()), (Ok(x), Ok(y)) if x == y)
}
