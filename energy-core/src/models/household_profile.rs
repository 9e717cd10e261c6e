use serde::{Deserialize, Serialize};

use super::{DwellingType, ElectricityUsageLevel};

/// Household and building parameters for a single estimate.
///
/// Built once per request by the form layer and never mutated afterwards.
/// Select-style fields the user may leave blank are `Option`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub dwelling_type: Option<DwellingType>,
    /// Heated floor area in square metres. Must be greater than zero.
    pub floor_area_sqm: u32,
    pub build_year: Option<i32>,
    pub has_been_upgraded: bool,
    pub occupant_count: u32,
    pub electricity_usage: Option<ElectricityUsageLevel>,
    /// Key into the subsidy table. Matched exactly.
    pub municipality: Option<String>,
}
