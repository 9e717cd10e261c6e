//! Policy constants for the estimation engine.
//!
//! Every figure the engine uses lives here so a change in subsidy policy or
//! in the consumption model is a configuration change. The defaults are the
//! figures the advisor has always shipped with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MeasureKind;

/// Errors raised by [`EnginePolicy::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("{name} must be non-negative, got {value}")]
    NegativeConsumptionCoefficient { name: &'static str, value: i64 },

    #[error("capital cost for {} must be non-negative, got {value}", .measure.label())]
    NegativeCapitalCost { measure: MeasureKind, value: Decimal },

    #[error("national subsidy for {} must be non-negative, got {value}", .measure.label())]
    NegativeNationalSubsidy { measure: MeasureKind, value: Decimal },

    #[error("payback value per kWh must be positive, got {0}")]
    InvalidPaybackValue(Decimal),
}

/// Linear model for annual household consumption.
///
/// `consumption = area × kwh_per_sqm + occupants × kwh_per_occupant`, plus a
/// flat offset for high or low electricity use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionModel {
    pub kwh_per_sqm: i64,
    pub kwh_per_occupant: i64,
    pub high_usage_offset_kwh: i64,
    pub low_usage_offset_kwh: i64,
}

impl Default for ConsumptionModel {
    fn default() -> Self {
        Self {
            kwh_per_sqm: 160,
            kwh_per_occupant: 500,
            high_usage_offset_kwh: 2000,
            low_usage_offset_kwh: -1000,
        }
    }
}

/// Fixed figures for one catalog measure. The municipal subsidy is not part
/// of the policy; it comes from the subsidy table per profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurePolicy {
    pub capital_cost: Decimal,
    pub annual_savings_kwh: i64,
    pub national_subsidy: Decimal,
}

impl MeasurePolicy {
    pub fn attic_insulation() -> Self {
        Self {
            capital_cost: Decimal::from(30_000),
            annual_savings_kwh: 2200,
            national_subsidy: Decimal::from(8000),
        }
    }

    pub fn heat_pump() -> Self {
        Self {
            capital_cost: Decimal::from(35_000),
            annual_savings_kwh: 4300,
            national_subsidy: Decimal::from(5000),
        }
    }
}

/// Complete engine configuration.
///
/// Deserializes from a partial document: any section left out keeps its
/// default. A measure section, when present, must be complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub consumption: ConsumptionModel,
    pub attic_insulation: MeasurePolicy,
    pub heat_pump: MeasurePolicy,
    /// Share of each saved kWh counted toward paying back the investment.
    pub payback_value_per_kwh: Decimal,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            consumption: ConsumptionModel::default(),
            attic_insulation: MeasurePolicy::attic_insulation(),
            heat_pump: MeasurePolicy::heat_pump(),
            payback_value_per_kwh: Decimal::new(25, 2),
        }
    }
}

impl EnginePolicy {
    /// Policy entries in catalog order.
    pub fn measures(&self) -> [(MeasureKind, &MeasurePolicy); 2] {
        [
            (MeasureKind::AtticInsulation, &self.attic_insulation),
            (MeasureKind::HeatPump, &self.heat_pump),
        ]
    }

    /// Checks that the policy can produce a meaningful report.
    ///
    /// Annual savings are deliberately not checked here: zero or negative
    /// total savings surface as
    /// [`EstimationError::DegenerateSavings`](crate::EstimationError::DegenerateSavings)
    /// when a report is generated.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use energy_core::{EnginePolicy, PolicyError};
    ///
    /// let policy = EnginePolicy {
    ///     payback_value_per_kwh: dec!(0),
    ///     ..EnginePolicy::default()
    /// };
    ///
    /// assert_eq!(policy.validate(), Err(PolicyError::InvalidPaybackValue(dec!(0))));
    /// ```
    pub fn validate(&self) -> Result<(), PolicyError> {
        let coefficients = [
            ("kwh_per_sqm", self.consumption.kwh_per_sqm),
            ("kwh_per_occupant", self.consumption.kwh_per_occupant),
        ];
        for (name, value) in coefficients {
            if value < 0 {
                return Err(PolicyError::NegativeConsumptionCoefficient { name, value });
            }
        }

        for (measure, policy) in self.measures() {
            if policy.capital_cost < Decimal::ZERO {
                return Err(PolicyError::NegativeCapitalCost {
                    measure,
                    value: policy.capital_cost,
                });
            }
            if policy.national_subsidy < Decimal::ZERO {
                return Err(PolicyError::NegativeNationalSubsidy {
                    measure,
                    value: policy.national_subsidy,
                });
            }
        }

        if self.payback_value_per_kwh <= Decimal::ZERO {
            return Err(PolicyError::InvalidPaybackValue(self.payback_value_per_kwh));
        }
        Ok(())
    }
}
