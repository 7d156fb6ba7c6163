//! Error types and error reporting utilities

use colored::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MdocError {
    #[error("Output location already exists: {path}")]
    OutputAlreadyExists { path: PathBuf },

    #[error("Input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to move {from} aside to {to}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}; input files are in {originals}")]
    CreateOutput {
        path: PathBuf,
        /// Where the untouched input ended up
        originals: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable file {path}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No header date found in {path}")]
    NoHeaderDateFound { path: PathBuf },

    #[error("DateTime line {line} in {path} has no date to replace")]
    MalformedDateTimeLine { path: PathBuf, line: usize },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl MdocError {
    /// Errors that stop a batch before any file is touched
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MdocError::UnreadableFile { .. }
                | MdocError::WriteFailed { .. }
                | MdocError::NoHeaderDateFound { .. }
                | MdocError::MalformedDateTimeLine { .. }
        )
    }
}

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    let mut current = error.source();
    while let Some(cause) = current {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
        current = std::error::Error::source(cause);
    }
}

/// Print an error with a suggestion
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
