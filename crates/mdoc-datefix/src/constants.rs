//! Constants used throughout the crate

/// Label of the per-image acquisition timestamp field
pub const DEFAULT_MARKER: &str = "DateTime";

/// Extension of the files the batch driver picks up
pub const DEFAULT_EXTENSION: &str = "mdoc";

/// Appended to the input directory name when it is moved aside
pub const DEFAULT_BACKUP_SUFFIX: &str = "_original";

/// Per-directory configuration file
pub const CONFIG_FILENAME: &str = ".mdocfix.toml";

/// Conventional name of the tilt-series list consumed by the denoising wrapper
pub const TOMO_LIST_FILENAME: &str = "tomo_list.txt";
