//! Energy-savings estimation.
//!
//! [`EstimationEngine`] turns a [`HouseholdProfile`](crate::HouseholdProfile)
//! and a [`SubsidyTable`](crate::SubsidyTable) into an
//! [`EnergyReport`](crate::EnergyReport) using the constants held in an
//! [`EnginePolicy`].

pub mod common;
pub mod engine;
pub mod policy;

pub use engine::{EstimationEngine, EstimationError};
pub use policy::{ConsumptionModel, EnginePolicy, MeasurePolicy, PolicyError};
