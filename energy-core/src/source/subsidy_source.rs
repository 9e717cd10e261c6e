use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SubsidyTable;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Subsidy data not found: {0}")]
    NotFound(String),

    #[error("Malformed subsidy data: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Where the subsidy table comes from.
///
/// `format` must match the [`SubsidySource::format_name`] of a registered
/// source. `location` is passed through unchanged; for the file-backed
/// sources it is a path.
///
/// | format | location examples                    |
/// |--------|--------------------------------------|
/// | `json` | `data/municipal_subsidies.json`      |
/// | `csv`  | `data/municipal_subsidies.csv`       |
///
/// With no location the advisor runs on an empty table, so every
/// municipality resolves to zero subsidies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsidySourceConfig {
    /// Lowercase identifier matching a registered source (e.g. `"json"`).
    pub format: String,
    pub location: Option<PathBuf>,
}

impl Default for SubsidySourceConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            location: None,
        }
    }
}

/// One implementation per data format. Each is registered with a
/// [`SubsidySourceRegistry`](super::SubsidySourceRegistry) at startup and
/// asked to load the table exactly once.
pub trait SubsidySource: Send + Sync {
    /// Unique, lowercase identifier for this format.
    fn format_name(&self) -> &'static str;

    /// Read and parse the complete table described by `config`.
    fn load(&self, config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError>;
}
