//! Configuration domain types.
//!
//! Contains the extraction settings, the backups layout and the per-file
//! failure policy, all loadable from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when a single export cannot be read, parsed or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing export.
    #[default]
    Abort,
    /// Record the failure and continue with the next export.
    Skip,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" | "fail" => Ok(Self::Abort),
            "skip" | "continue" => Ok(Self::Skip),
            _ => Err(format!("Unknown failure policy: {s}. Use: abort, skip")),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Settings for a single extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Extension of export files, without the dot.
    #[serde(default = "default_export_extension")]
    pub export_extension: String,

    /// Extension of produced source files, without the dot.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Per-file failure policy.
    #[serde(default)]
    pub on_error: FailurePolicy,

    /// Process exports sorted by file name instead of listing order.
    #[serde(default)]
    pub sort: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            export_extension: default_export_extension(),
            source_extension: default_source_extension(),
            on_error: FailurePolicy::default(),
            sort: false,
        }
    }
}

fn default_export_extension() -> String {
    "epe".into()
}

fn default_source_extension() -> String {
    "js".into()
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding one subdirectory per profile.
    /// Defaults to `backups` in the directory of the running executable.
    #[serde(default)]
    pub backups_dir: Option<PathBuf>,
}

/// Settings for extracting every profile at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Create a profile's `src` directory when it is missing.
    #[serde(default = "default_create_output")]
    pub create_output: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            create_output: default_create_output(),
        }
    }
}

const fn default_create_output() -> bool {
    true
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,

    /// Whole-backup extraction settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Get the default configuration directory path.
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("epe-extract")
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_file() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }
}
