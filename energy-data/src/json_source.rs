use std::collections::BTreeMap;
use std::io::{Read, Write};

use energy_core::{MunicipalSubsidies, SourceError, SubsidySource, SubsidySourceConfig, SubsidyTable};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use crate::error::{SubsidyLoaderError, check_amounts, read_file};

/// Subsidy table stored as a JSON object keyed by municipality name.
///
/// Each value holds the attic insulation and heat pump subsidies, under
/// either the Norwegian keys (`loft`, `varmepumpe`) or the English ones
/// (`attic_insulation`, `heat_pump`). A missing key means no subsidy; other
/// keys are ignored. If a municipality appears twice, the last entry wins.
pub struct JsonSubsidySource;

impl JsonSubsidySource {
    /// Parse a subsidy table from any JSON reader.
    pub fn parse<R: Read>(reader: R) -> Result<SubsidyTable, SubsidyLoaderError> {
        let entries: BTreeMap<String, MunicipalSubsidies> = serde_json::from_reader(reader)?;

        for (municipality, subsidies) in &entries {
            check_amounts(municipality, &[subsidies.attic_insulation, subsidies.heat_pump])?;
        }

        Ok(entries.into_iter().collect())
    }
}

impl SubsidySource for JsonSubsidySource {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn load(&self, config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError> {
        let path = config.location.as_deref().ok_or_else(|| {
            SourceError::Configuration("json subsidy source needs a file location".to_string())
        })?;
        let contents = read_file(path)?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "read subsidy data file");
        Ok(Self::parse(contents.as_bytes())?)
    }
}

/// Write `table` as a pretty-printed JSON data file with numeric amounts.
pub fn write_json<W: Write>(
    table: &SubsidyTable,
    writer: W,
) -> Result<(), SubsidyLoaderError> {
    let object: Map<String, Value> = table
        .iter()
        .map(|(municipality, subsidies)| {
            let mut amounts = Map::new();
            amounts.insert(
                "attic_insulation".to_string(),
                amount_value(subsidies.attic_insulation),
            );
            amounts.insert("heat_pump".to_string(), amount_value(subsidies.heat_pump));
            (municipality.to_string(), Value::Object(amounts))
        })
        .collect();

    serde_json::to_writer_pretty(writer, &Value::Object(object))?;
    Ok(())
}

/// Whole amounts become JSON integers, anything else a float.
fn amount_value(amount: Decimal) -> Value {
    if amount.fract().is_zero() {
        if let Some(whole) = amount.to_i64() {
            return Value::Number(Number::from(whole));
        }
    }
    amount
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(amount.to_string()))
}
