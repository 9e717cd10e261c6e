pub mod registry;
pub mod subsidy_source;

pub use registry::SubsidySourceRegistry;
pub use subsidy_source::{SourceError, SubsidySource, SubsidySourceConfig};
