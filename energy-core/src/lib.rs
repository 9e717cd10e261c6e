pub mod calculations;
pub mod models;
pub mod source;

pub use calculations::{EnginePolicy, EstimationEngine, EstimationError, PolicyError};
pub use models::*;
pub use source::{SourceError, SubsidySource, SubsidySourceConfig, SubsidySourceRegistry};
