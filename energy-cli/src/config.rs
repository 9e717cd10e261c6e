//! TOML configuration for the advisor.
//!
//! Every section is optional; an empty file yields the built-in defaults.
//!
//! ```toml
//! [subsidies]
//! format = "json"
//! location = "data/municipal_subsidies.json"
//!
//! [policy]
//! payback_value_per_kwh = "0.25"
//!
//! [policy.consumption]
//! kwh_per_sqm = 160
//!
//! [export]
//! output = "energy-report.txt"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use energy_core::{EnginePolicy, SubsidySourceConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::document::{DEFAULT_EXPORT_FILE, DocumentLayout};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default destination for `--export` without a path.
    pub output: PathBuf,
    pub layout: DocumentLayout,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_EXPORT_FILE),
            layout: DocumentLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub subsidies: SubsidySourceConfig,
    pub policy: EnginePolicy,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl AdvisorConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}
