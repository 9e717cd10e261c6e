//! Command implementations behind the `energy-advisor` binary.
//!
//! Each command writes its output to a caller-supplied writer so the same
//! code serves stdout and the integration tests.

use std::io::Write;

use anyhow::{Context, Result};
use energy_core::{
    EnergyReport, EnginePolicy, EstimationEngine, SubsidySourceConfig, SubsidySourceRegistry,
    SubsidyTable,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::form::ProfileForm;
use crate::profile_csv::ProfileRow;
use crate::report_view::{OutputFormat, ReportView, render};

/// Registry with every subsidy format the advisor understands.
pub fn build_registry() -> SubsidySourceRegistry {
    energy_data::default_registry()
}

/// Load the process-wide subsidy table.
pub fn load_subsidies(config: &SubsidySourceConfig) -> Result<SubsidyTable> {
    let table = build_registry().load(config).with_context(|| match &config.location {
        Some(path) => format!("loading {} subsidies from {}", config.format, path.display()),
        None => format!("loading {} subsidies", config.format),
    })?;
    Ok(table)
}

/// Validate one form, estimate, and write the report.
pub fn run_estimate(
    form: &ProfileForm,
    table: &SubsidyTable,
    policy: &EnginePolicy,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<EnergyReport> {
    let profile = form.validate()?;
    let report = EstimationEngine::new(policy).generate_report(&profile, table)?;

    writeln!(out, "{}", render(&report, format)?)?;
    Ok(report)
}

#[derive(Debug, Serialize)]
struct BatchEntry<'a> {
    row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a EnergyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Estimate every validated row. A row rejected by validation or by the
/// engine is logged and reported in place; the remaining rows still run.
pub fn run_batch(
    rows: &[ProfileRow],
    table: &SubsidyTable,
    policy: &EnginePolicy,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let engine = EstimationEngine::new(policy);
    let results: Vec<Result<EnergyReport, String>> = rows
        .iter()
        .map(|row| match row {
            Ok(profile) => engine
                .generate_report(profile, table)
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        })
        .collect();

    let mut summary = BatchSummary::default();
    let mut entries = Vec::with_capacity(results.len());
    for (idx, result) in results.iter().enumerate() {
        let row = idx + 1;
        match result {
            Ok(report) => {
                summary.succeeded += 1;
                entries.push(BatchEntry {
                    row,
                    report: Some(report),
                    error: None,
                });
            }
            Err(err) => {
                summary.failed += 1;
                warn!(row, error = %err, "estimate failed");
                entries.push(BatchEntry {
                    row,
                    report: None,
                    error: Some(err.clone()),
                });
            }
        }
    }

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        }
        OutputFormat::Text => {
            for entry in &entries {
                writeln!(out, "=== Profile {} ===", entry.row)?;
                match (entry.report, &entry.error) {
                    (Some(report), _) => writeln!(out, "{}", ReportView(report))?,
                    (None, Some(error)) => writeln!(out, "Error: {error}")?,
                    (None, None) => {}
                }
                writeln!(out)?;
            }
        }
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
    Ok(summary)
}

/// Write the known municipality names, one per line, sorted.
pub fn list_municipalities(
    table: &SubsidyTable,
    out: &mut impl Write,
) -> Result<()> {
    for name in table.municipalities() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
