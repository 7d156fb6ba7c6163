use crate::constants::{CONFIG_FILENAME, DEFAULT_BACKUP_SUFFIX, DEFAULT_EXTENSION, DEFAULT_MARKER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration with layered defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Label identifying per-image timestamp lines
    pub marker: String,

    /// Extension of files picked up by the batch driver (no leading dot)
    pub extension: String,

    /// Appended to the input directory name when it is moved aside
    pub backup_suffix: String,

    /// Worker threads for batch processing (rayon default when unset)
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            jobs: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence
    ///
    /// An explicit config file must exist; otherwise `.mdocfix.toml` in
    /// `search_dir` is used when present.
    pub fn load(explicit: Option<&Path>, search_dir: &Path) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        let file_config = match explicit {
            Some(path) => Some(Self::load_from_file(path)?),
            None => {
                let path = search_dir.join(CONFIG_FILENAME);
                if path.exists() {
                    Some(Self::load_from_file(&path)?)
                } else {
                    None
                }
            }
        };

        if let Some(file_config) = file_config {
            config.merge(file_config);
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<PartialConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(val) = other.marker {
            self.marker = val;
        }
        if let Some(val) = other.extension {
            self.extension = val.trim_start_matches('.').to_string();
        }
        if let Some(val) = other.backup_suffix {
            self.backup_suffix = val;
        }
        if let Some(val) = other.jobs {
            self.jobs = Some(val);
        }
    }

    /// Apply command-line overrides on top of file and default settings
    pub fn with_overrides(mut self, marker: Option<String>, extension: Option<String>) -> Self {
        self.merge(PartialConfig { marker, extension, backup_suffix: None, jobs: None });
        self
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    marker: Option<String>,
    extension: Option<String>,
    backup_suffix: Option<String>,
    jobs: Option<usize>,
}
