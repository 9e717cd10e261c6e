use std::io;

use energy_core::SourceError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when reading subsidy data.
#[derive(Debug, Error)]
pub enum SubsidyLoaderError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("municipality '{municipality}' appears more than once (row {row})")]
    DuplicateMunicipality { municipality: String, row: usize },

    #[error("empty municipality name on row {row}")]
    EmptyMunicipality { row: usize },

    #[error("negative subsidy {value} for '{municipality}'")]
    NegativeSubsidy { municipality: String, value: Decimal },
}

impl From<csv::Error> for SubsidyLoaderError {
    fn from(err: csv::Error) -> Self {
        SubsidyLoaderError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for SubsidyLoaderError {
    fn from(err: serde_json::Error) -> Self {
        SubsidyLoaderError::JsonParse(err.to_string())
    }
}

impl From<SubsidyLoaderError> for SourceError {
    fn from(err: SubsidyLoaderError) -> Self {
        let not_found = matches!(
            &err,
            SubsidyLoaderError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound
        );
        if not_found {
            SourceError::NotFound(err.to_string())
        } else {
            SourceError::Malformed(err.to_string())
        }
    }
}

/// Reads the whole file at `path`.
pub(crate) fn read_file(path: &std::path::Path) -> Result<String, SubsidyLoaderError> {
    std::fs::read_to_string(path).map_err(|source| SubsidyLoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Rejects negative amounts; subsidies only ever reduce cost.
pub(crate) fn check_amounts(
    municipality: &str,
    amounts: &[Decimal],
) -> Result<(), SubsidyLoaderError> {
    match amounts.iter().find(|value| **value < Decimal::ZERO) {
        Some(value) => Err(SubsidyLoaderError::NegativeSubsidy {
            municipality: municipality.to_string(),
            value: *value,
        }),
        None => Ok(()),
    }
}
