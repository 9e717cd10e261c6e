mod dwelling_type;
mod energy_report;
mod household_profile;
mod measure;
mod subsidy;
mod usage_level;

pub use dwelling_type::DwellingType;
pub use energy_report::{EnergyReport, ReportTotals};
pub use household_profile::HouseholdProfile;
pub use measure::{Measure, MeasureKind};
pub use subsidy::{MunicipalSubsidies, SubsidyTable};
pub use usage_level::ElectricityUsageLevel;
