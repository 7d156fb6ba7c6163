//! MDOC timestamp repair library
//!
//! Tilt-series MDOC files record their acquisition date once in a header line
//! and again in a `DateTime` field per image. This library finds the header
//! date, canonicalizes it, and propagates it into every `DateTime` field,
//! leaving all other lines byte for byte intact.

pub mod batch;
pub mod config;
pub mod constants;
pub mod date;
pub mod errors;
pub mod reader;
pub mod rewrite;
pub mod theme;
pub mod tomo_list;

pub use batch::{
    list_mdoc_files, plan_batch, run_batch, BatchOptions, BatchPlan, BatchSummary, FileStatus,
    MdocListing,
};
pub use config::Config;
pub use date::{find_date_token, CanonicalDate, DateToken};
pub use errors::MdocError;
pub use rewrite::{rewrite_lines, rewrite_str, LineRewriter, RewriteReport, ScanState};

/// Re-export common error types
pub use anyhow::{Error, Result};
