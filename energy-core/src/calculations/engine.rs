//! The estimation engine.
//!
//! A report is built in four steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Estimated annual consumption from floor area, occupants and usage level |
//! | 2    | Municipal subsidies looked up by municipality name (zero when unknown) |
//! | 3    | Measure catalog: attic insulation, then heat pump |
//! | 4    | Totals and payback time: `(cost − subsidy) / (savings × 0.25)` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use energy_core::{
//!     ElectricityUsageLevel, EnginePolicy, EstimationEngine, HouseholdProfile, SubsidyTable,
//! };
//!
//! let policy = EnginePolicy::default();
//! let engine = EstimationEngine::new(&policy);
//!
//! let profile = HouseholdProfile {
//!     floor_area_sqm: 100,
//!     occupant_count: 2,
//!     electricity_usage: Some(ElectricityUsageLevel::Medium),
//!     ..HouseholdProfile::default()
//! };
//!
//! let report = engine.generate_report(&profile, &SubsidyTable::new()).unwrap();
//!
//! assert_eq!(report.estimated_annual_consumption_kwh, 17000);
//! assert_eq!(report.totals.total_subsidy, dec!(13000));
//! assert_eq!(report.totals.payback_years, dec!(32.0));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use super::common::round_to_tenth;
use super::policy::{EnginePolicy, PolicyError};
use crate::{
    ElectricityUsageLevel, EnergyReport, HouseholdProfile, Measure, MeasureKind,
    MunicipalSubsidies, ReportTotals, SubsidyTable,
};

/// Errors that can occur while generating a report.
///
/// An unknown municipality is not an error; it resolves to zero subsidies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimationError {
    /// A profile field is missing or outside its valid range.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Total annual savings are zero or negative, so payback time is undefined.
    #[error("total annual savings of {total_annual_savings_kwh} kWh leave payback time undefined")]
    DegenerateSavings { total_annual_savings_kwh: i64 },

    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),

    /// A configured figure is so large that `step` left the representable range.
    #[error("arithmetic overflow while computing {step}")]
    Overflow { step: &'static str },
}

/// Stateless calculator over a borrowed [`EnginePolicy`].
///
/// Every call recomputes from scratch; the same profile and table always
/// produce an equal report.
#[derive(Debug, Clone, Copy)]
pub struct EstimationEngine<'a> {
    policy: &'a EnginePolicy,
}

impl<'a> EstimationEngine<'a> {
    pub fn new(policy: &'a EnginePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EnginePolicy {
        self.policy
    }

    /// Generates the complete report for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError`] if:
    /// - the policy fails [`EnginePolicy::validate`]
    /// - the floor area is zero
    /// - total annual savings are zero or negative
    pub fn generate_report(
        &self,
        profile: &HouseholdProfile,
        table: &SubsidyTable,
    ) -> Result<EnergyReport, EstimationError> {
        self.policy.validate()?;
        self.validate_profile(profile)?;

        let estimated_annual_consumption_kwh = self.estimate_consumption(profile)?;
        let subsidies = self.lookup_subsidies(profile.municipality.as_deref(), table);
        let measures = self.build_measure_catalog(&subsidies);
        let totals = self.aggregate(&measures)?;

        debug!(
            consumption_kwh = estimated_annual_consumption_kwh,
            total_subsidy = %totals.total_subsidy,
            payback_years = %totals.payback_years,
            "report generated"
        );

        Ok(EnergyReport {
            profile: profile.clone(),
            estimated_annual_consumption_kwh,
            measures,
            totals,
        })
    }

    /// Fails fast on values the consumption model cannot use.
    fn validate_profile(
        &self,
        profile: &HouseholdProfile,
    ) -> Result<(), EstimationError> {
        if profile.floor_area_sqm == 0 {
            return Err(EstimationError::InvalidInput {
                field: "floor_area_sqm".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Estimated annual consumption in kWh.
    ///
    /// The low-usage offset is applied as is; the result is not clamped at
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::Overflow`] when the configured coefficients
    /// push the result outside `i64`.
    pub fn estimate_consumption(
        &self,
        profile: &HouseholdProfile,
    ) -> Result<i64, EstimationError> {
        let model = &self.policy.consumption;
        i64::from(profile.floor_area_sqm)
            .checked_mul(model.kwh_per_sqm)
            .zip(i64::from(profile.occupant_count).checked_mul(model.kwh_per_occupant))
            .and_then(|(area, occupants)| area.checked_add(occupants))
            .and_then(|base| base.checked_add(self.usage_offset(profile.electricity_usage)))
            .ok_or(EstimationError::Overflow {
                step: "annual consumption",
            })
    }

    fn usage_offset(
        &self,
        usage: Option<ElectricityUsageLevel>,
    ) -> i64 {
        match usage {
            Some(ElectricityUsageLevel::High) => self.policy.consumption.high_usage_offset_kwh,
            Some(ElectricityUsageLevel::Low) => self.policy.consumption.low_usage_offset_kwh,
            Some(ElectricityUsageLevel::Medium) | None => 0,
        }
    }

    /// Municipal subsidies for `municipality`; zero for both measures when the
    /// municipality is unset or unknown.
    pub fn lookup_subsidies(
        &self,
        municipality: Option<&str>,
        table: &SubsidyTable,
    ) -> MunicipalSubsidies {
        if let Some(name) = municipality {
            if !table.contains(name) {
                debug!(municipality = name, "municipality not in subsidy table; no municipal subsidy");
            }
        }
        table.subsidies_for(municipality)
    }

    /// The two catalog measures, attic insulation first, with municipal
    /// subsidies filled in from `subsidies`.
    pub fn build_measure_catalog(
        &self,
        subsidies: &MunicipalSubsidies,
    ) -> Vec<Measure> {
        self.policy
            .measures()
            .into_iter()
            .map(|(kind, policy)| Measure {
                kind,
                name: kind.label().to_string(),
                capital_cost: policy.capital_cost,
                annual_savings_kwh: policy.annual_savings_kwh,
                national_subsidy: policy.national_subsidy,
                municipal_subsidy: match kind {
                    MeasureKind::AtticInsulation => subsidies.attic_insulation,
                    MeasureKind::HeatPump => subsidies.heat_pump,
                },
            })
            .collect()
    }

    /// Sums the catalog and derives payback time, rounded to one decimal
    /// place (ties away from zero).
    ///
    /// Net cost is not clamped: subsidies larger than the capital cost give a
    /// negative payback time.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::DegenerateSavings`] when total annual
    /// savings are zero or negative.
    pub fn aggregate(
        &self,
        measures: &[Measure],
    ) -> Result<ReportTotals, EstimationError> {
        let overflow = |step| EstimationError::Overflow { step };
        let total_annual_savings_kwh = measures
            .iter()
            .try_fold(0i64, |sum, m| sum.checked_add(m.annual_savings_kwh))
            .ok_or(overflow("total annual savings"))?;
        let total_subsidy = measures
            .iter()
            .try_fold(Decimal::ZERO, |sum, m| {
                m.national_subsidy
                    .checked_add(m.municipal_subsidy)
                    .and_then(|subsidy| sum.checked_add(subsidy))
            })
            .ok_or(overflow("total subsidy"))?;
        let total_capital_cost = measures
            .iter()
            .try_fold(Decimal::ZERO, |sum, m| sum.checked_add(m.capital_cost))
            .ok_or(overflow("total capital cost"))?;

        let payback_years = self.payback_years(
            total_capital_cost,
            total_subsidy,
            total_annual_savings_kwh,
        )?;

        Ok(ReportTotals {
            total_annual_savings_kwh,
            total_subsidy,
            total_capital_cost,
            payback_years,
        })
    }

    fn payback_years(
        &self,
        total_capital_cost: Decimal,
        total_subsidy: Decimal,
        total_annual_savings_kwh: i64,
    ) -> Result<Decimal, EstimationError> {
        let degenerate = EstimationError::DegenerateSavings {
            total_annual_savings_kwh,
        };
        if total_annual_savings_kwh <= 0 {
            warn!(total_annual_savings_kwh, "total annual savings not positive");
            return Err(degenerate);
        }

        let overflow = || EstimationError::Overflow {
            step: "payback time",
        };
        let net_cost = total_capital_cost
            .checked_sub(total_subsidy)
            .ok_or_else(overflow)?;
        let annual_value = Decimal::from(total_annual_savings_kwh)
            .checked_mul(self.policy.payback_value_per_kwh)
            .ok_or_else(overflow)?;
        if annual_value <= Decimal::ZERO {
            return Err(degenerate);
        }

        let years = net_cost.checked_div(annual_value).ok_or_else(overflow)?;
        Ok(round_to_tenth(years))
    }
}
