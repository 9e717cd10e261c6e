use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    AtticInsulation,
    HeatPump,
}

impl MeasureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AtticInsulation => "Attic insulation",
            Self::HeatPump => "Heat pump installation",
        }
    }
}

/// An energy-saving intervention with its cost, savings and subsidies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub kind: MeasureKind,
    pub name: String,
    pub capital_cost: Decimal,
    pub annual_savings_kwh: i64,
    pub national_subsidy: Decimal,
    pub municipal_subsidy: Decimal,
}

impl Measure {
    /// National plus municipal subsidy for this measure.
    pub fn total_subsidy(&self) -> Decimal {
        self.national_subsidy + self.municipal_subsidy
    }
}
