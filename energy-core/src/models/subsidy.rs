use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Municipal subsidy amounts for the two catalog measures.
///
/// Norwegian data files use the keys `loft` and `varmepumpe`; both are
/// accepted when deserializing. A missing key means no subsidy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalSubsidies {
    #[serde(default, alias = "loft")]
    pub attic_insulation: Decimal,
    #[serde(default, alias = "varmepumpe")]
    pub heat_pump: Decimal,
}

impl MunicipalSubsidies {
    pub const NONE: Self = Self {
        attic_insulation: Decimal::ZERO,
        heat_pump: Decimal::ZERO,
    };
}

/// Read-only mapping of municipality name to subsidy amounts.
///
/// Built once at startup by a [`SubsidySource`](crate::SubsidySource) and
/// shared by reference afterwards. Names are kept sorted so
/// [`municipalities`](Self::municipalities) can feed a selection list
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsidyTable {
    entries: BTreeMap<String, MunicipalSubsidies>,
}

impl SubsidyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, municipality: &str) -> Option<&MunicipalSubsidies> {
        self.entries.get(municipality)
    }

    /// Subsidies for `municipality`, or zero for both measures when the
    /// municipality is unset or not in the table.
    pub fn subsidies_for(&self, municipality: Option<&str>) -> MunicipalSubsidies {
        municipality
            .and_then(|name| self.get(name))
            .copied()
            .unwrap_or(MunicipalSubsidies::NONE)
    }

    pub fn contains(&self, municipality: &str) -> bool {
        self.entries.contains_key(municipality)
    }

    /// Known municipality names in sorted order.
    pub fn municipalities(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MunicipalSubsidies)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, MunicipalSubsidies)> for SubsidyTable {
    fn from_iter<I: IntoIterator<Item = (String, MunicipalSubsidies)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_table() -> SubsidyTable {
        [
            (
                "Oslo".to_string(),
                MunicipalSubsidies {
                    attic_insulation: dec!(10000),
                    heat_pump: dec!(6000),
                },
            ),
            (
                "Bergen".to_string(),
                MunicipalSubsidies {
                    attic_insulation: dec!(5000),
                    heat_pump: dec!(0),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn subsidies_for_known_municipality_returns_stored_values() {
        let table = test_table();

        let result = table.subsidies_for(Some("Oslo"));

        assert_eq!(result.attic_insulation, dec!(10000));
        assert_eq!(result.heat_pump, dec!(6000));
    }

    #[test]
    fn subsidies_for_unknown_municipality_is_zero() {
        let table = test_table();

        assert_eq!(table.subsidies_for(Some("Trondheim")), MunicipalSubsidies::NONE);
    }

    #[test]
    fn subsidies_for_unset_municipality_is_zero() {
        let table = test_table();

        assert_eq!(table.subsidies_for(None), MunicipalSubsidies::NONE);
    }

    #[test]
    fn lookup_does_not_normalize_case_or_whitespace() {
        let table = test_table();

        assert_eq!(table.subsidies_for(Some("oslo")), MunicipalSubsidies::NONE);
        assert_eq!(table.subsidies_for(Some(" Oslo")), MunicipalSubsidies::NONE);
    }

    #[test]
    fn municipalities_are_sorted() {
        let table = test_table();

        assert_eq!(table.municipalities(), vec!["Bergen", "Oslo"]);
    }

    #[test]
    fn empty_table_has_no_municipalities() {
        let table = SubsidyTable::new();

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.municipalities().is_empty());
    }
}
