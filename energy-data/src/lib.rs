//! Subsidy data sources for the energy advisor.
//!
//! Two file formats are supported, both registered by [`default_registry`]:
//!
//! | format | shape |
//! |--------|-------|
//! | `json` | `{ "<municipality>": { "loft": 10000, "varmepumpe": 6000 } }` |
//! | `csv`  | `municipality,attic_insulation,heat_pump` |

mod csv_source;
mod error;
mod json_source;

use energy_core::SubsidySourceRegistry;

pub use csv_source::{CsvSubsidySource, SubsidyRecord};
pub use error::SubsidyLoaderError;
pub use json_source::{JsonSubsidySource, write_json};

/// A registry with every format this crate provides.
pub fn default_registry() -> SubsidySourceRegistry {
    let mut registry = SubsidySourceRegistry::new();
    registry.register(Box::new(JsonSubsidySource));
    registry.register(Box::new(CsvSubsidySource));
    registry
}
