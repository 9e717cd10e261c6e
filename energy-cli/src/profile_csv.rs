//! CSV loader for batches of household profiles.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Cells are
//! trimmed, and every cell goes through the same coercion as the
//! interactive form (see [`ProfileForm::validate`]). A structurally broken
//! file fails as a whole; a row whose fields are rejected is kept as that
//! row's [`FormError`] so the other rows can still be estimated.
//!
//! | Column            | Required | Notes |
//! |-------------------|----------|-------|
//! | `floor_area_sqm`  | yes      | whole number > 0 |
//! | `occupants`       | yes      | whole number |
//! | `dwelling_type`   | no       | `detached`, `terraced`, `apartment` (or `enebolig`, `rekkehus`, `leilighet`) |
//! | `build_year`      | no       | |
//! | `upgraded`        | no       | `yes`/`no` (or `ja`/`nei`) |
//! | `usage_level`     | no       | `low`, `medium`, `high` (or `lav`, `middels`, `hoy`) |
//! | `municipality`    | no       | key into the subsidy table |
//!
//! ### Example
//!
//! ```csv
//! dwelling_type,floor_area_sqm,build_year,upgraded,occupants,usage_level,municipality
//! detached,150,1978,no,4,high,Oslo
//! apartment,60,,,1,,
//! ```

use std::path::{Path, PathBuf};

use energy_core::HouseholdProfile;
use serde::Deserialize;

use crate::form::{FormError, ProfileForm};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    dwelling_type: String,
    floor_area_sqm: String,
    build_year: String,
    upgraded: String,
    occupants: String,
    usage_level: String,
    municipality: String,
}

impl From<CsvRow> for ProfileForm {
    fn from(row: CsvRow) -> Self {
        Self {
            dwelling_type: row.dwelling_type,
            floor_area: row.floor_area_sqm,
            build_year: row.build_year,
            upgraded: row.upgraded,
            occupants: row.occupants,
            usage_level: row.usage_level,
            municipality: row.municipality,
        }
    }
}

/// One row after validation, in file order. Row numbers are 1-based,
/// header excluded, so row `n` is at index `n - 1`.
pub type ProfileRow = Result<HouseholdProfile, FormError>;

/// Errors that fail a whole profile batch.
#[derive(Debug, thiserror::Error)]
pub enum ProfileCsvError {
    /// The CSV itself is structurally invalid.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse CSV text and validate every row.
pub fn load_from_str(input: &str) -> Result<Vec<ProfileRow>, ProfileCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let validated = ProfileForm::from(result?).validate();
            if let Err(err) = &validated {
                tracing::debug!(row = idx + 1, error = %err, "profile row rejected");
            }
            Ok(validated)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ProfileRow>, ProfileCsvError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileCsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles = load_from_str(&contents)?;
    let rejected = profiles.iter().filter(|row| row.is_err()).count();
    tracing::info!(
        path = %path.display(),
        count = profiles.len(),
        rejected,
        "loaded profile batch"
    );
    Ok(profiles)
}
