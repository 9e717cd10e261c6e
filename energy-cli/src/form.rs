//! Form controller: raw field text in, validated [`HouseholdProfile`] out.
//!
//! Select fields accept both English and Norwegian codes:
//!
//! | Field          | Accepted values |
//! |----------------|-----------------|
//! | dwelling type  | `detached`/`enebolig`, `terraced`/`rekkehus`, `apartment`/`leilighet` |
//! | upgraded       | `yes`/`ja`/`true`, `no`/`nei`/`false` |
//! | usage level    | `low`/`lav`, `medium`/`middels`, `high`/`hoy`/`høy` |
//!
//! An empty select means "not chosen". Floor area and occupant count are
//! required.

use energy_core::{DwellingType, ElectricityUsageLevel, HouseholdProfile};
use thiserror::Error;

use crate::utils::parse_whole_number;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// The form was rejected. Every problem found is listed, in field order.
    #[error("invalid input: {}", .problems.join("; "))]
    InvalidInput { problems: Vec<String> },
}

impl FormError {
    pub fn problems(&self) -> &[String] {
        match self {
            Self::InvalidInput { problems } => problems,
        }
    }
}

/// Raw text of every form field, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub dwelling_type: String,
    pub floor_area: String,
    pub build_year: String,
    pub upgraded: String,
    pub occupants: String,
    pub usage_level: String,
    pub municipality: String,
}

impl ProfileForm {
    /// Coerce every field and build the profile, or report every problem.
    pub fn validate(&self) -> Result<HouseholdProfile, FormError> {
        let mut problems = Vec::new();

        let dwelling_type = parse_select(
            &mut problems,
            "Dwelling type",
            &self.dwelling_type,
            DwellingType::parse,
        );
        let floor_area_sqm = parse_required::<u32>(&mut problems, "Floor area", &self.floor_area);
        if floor_area_sqm == Some(0) {
            problems.push("Floor area must be greater than zero".to_string());
        }
        let build_year = match parse_whole_number::<i32>(&self.build_year) {
            Ok(year) => year,
            Err(_) => {
                problems.push("Build year must be a whole number".to_string());
                None
            }
        };
        let has_been_upgraded = parse_select(&mut problems, "Upgraded", &self.upgraded, parse_yes_no)
            .unwrap_or(false);
        let occupant_count = parse_required::<u32>(&mut problems, "Occupants", &self.occupants);
        let electricity_usage = parse_select(
            &mut problems,
            "Electricity usage level",
            &self.usage_level,
            ElectricityUsageLevel::parse,
        );
        let municipality = Some(self.municipality.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        match (floor_area_sqm, occupant_count) {
            (Some(floor_area_sqm), Some(occupant_count)) if problems.is_empty() => {
                Ok(HouseholdProfile {
                    dwelling_type,
                    floor_area_sqm,
                    build_year,
                    has_been_upgraded,
                    occupant_count,
                    electricity_usage,
                    municipality,
                })
            }
            _ => {
                tracing::debug!(count = problems.len(), "profile form rejected");
                Err(FormError::InvalidInput { problems })
            }
        }
    }
}

fn parse_required<T: std::str::FromStr>(
    problems: &mut Vec<String>,
    field: &str,
    value: &str,
) -> Option<T> {
    match parse_whole_number(value) {
        Ok(Some(v)) => Some(v),
        Ok(None) => {
            problems.push(format!("{field} is required"));
            None
        }
        Err(_) => {
            problems.push(format!("{field} must be a whole number of zero or more"));
            None
        }
    }
}

fn parse_select<T>(
    problems: &mut Vec<String>,
    field: &str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse(trimmed);
    if parsed.is_none() {
        problems.push(format!("{field} '{trimmed}' is not recognised"));
    }
    parsed
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "ja" | "true" => Some(true),
        "no" | "nei" | "false" => Some(false),
        _ => None,
    }
}
