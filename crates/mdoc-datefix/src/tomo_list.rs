//! Tilt-series name list for the downstream denoising wrapper
//!
//! The wrapper takes a plain text file with one tilt-series name per line,
//! the MDOC file name without its extension.

use crate::batch::MdocListing;
use std::path::Path;

/// Tilt-series names (file stems) of the listed MDOC files, sorted
///
/// Unreadable entries are left out; only files the batch can process belong
/// in the list.
pub fn tomo_names(listing: &MdocListing) -> Vec<String> {
    listing
        .files
        .iter()
        .filter_map(|name| Path::new(name).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect()
}

/// Render names as the newline-terminated list file body
pub fn render_tomo_list(names: &[String]) -> String {
    names.iter().map(|n| format!("{}\n", n)).collect()
}
