use std::collections::BTreeMap;
use std::io::Read;

use energy_core::{MunicipalSubsidies, SourceError, SubsidySource, SubsidySourceConfig, SubsidyTable};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{SubsidyLoaderError, check_amounts, read_file};

/// A single row of a subsidy CSV sheet.
///
/// Columns are matched by header name, so order does not matter:
/// - `municipality`: exact name used for lookups
/// - `attic_insulation` (or `loft`): subsidy amount, empty for none
/// - `heat_pump` (or `varmepumpe`): subsidy amount, empty for none
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubsidyRecord {
    pub municipality: String,
    #[serde(alias = "loft")]
    pub attic_insulation: Option<Decimal>,
    #[serde(alias = "varmepumpe")]
    pub heat_pump: Option<Decimal>,
}

/// Subsidy table stored as a CSV sheet, one municipality per row.
pub struct CsvSubsidySource;

impl CsvSubsidySource {
    /// Parse subsidy records from a CSV reader. Rows are returned in file
    /// order; surrounding whitespace is trimmed.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SubsidyRecord>, SubsidyLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SubsidyRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a table from parsed records.
    ///
    /// Rows are numbered from 1 (the header is row 0) in error messages.
    pub fn into_table(records: Vec<SubsidyRecord>) -> Result<SubsidyTable, SubsidyLoaderError> {
        let mut entries = BTreeMap::new();

        for (idx, record) in records.into_iter().enumerate() {
            let row = idx + 1;
            if record.municipality.is_empty() {
                return Err(SubsidyLoaderError::EmptyMunicipality { row });
            }

            let subsidies = MunicipalSubsidies {
                attic_insulation: record.attic_insulation.unwrap_or(Decimal::ZERO),
                heat_pump: record.heat_pump.unwrap_or(Decimal::ZERO),
            };
            check_amounts(
                &record.municipality,
                &[subsidies.attic_insulation, subsidies.heat_pump],
            )?;

            if entries.contains_key(&record.municipality) {
                return Err(SubsidyLoaderError::DuplicateMunicipality {
                    municipality: record.municipality,
                    row,
                });
            }
            entries.insert(record.municipality, subsidies);
        }

        Ok(entries.into_iter().collect())
    }
}

impl SubsidySource for CsvSubsidySource {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn load(&self, config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError> {
        let path = config.location.as_deref().ok_or_else(|| {
            SourceError::Configuration("csv subsidy source needs a file location".to_string())
        })?;
        let contents = read_file(path)?;
        let records = Self::parse(contents.as_bytes())?;
        tracing::debug!(path = %path.display(), rows = records.len(), "parsed subsidy sheet");
        Ok(Self::into_table(records)?)
    }
}
