use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{HouseholdProfile, Measure};

/// Sums over the measure catalog plus the derived payback time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_annual_savings_kwh: i64,
    pub total_subsidy: Decimal,
    pub total_capital_cost: Decimal,
    /// Rounded to one decimal place.
    pub payback_years: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyReport {
    pub profile: HouseholdProfile,
    pub estimated_annual_consumption_kwh: i64,
    /// Attic insulation first, then heat pump.
    pub measures: Vec<Measure>,
    #[serde(flatten)]
    pub totals: ReportTotals,
}
