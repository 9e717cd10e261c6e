//! End-to-end runs over the fixture files: configuration, subsidy data and
//! a profile batch go through the same calls the binary makes.

use std::path::{Path, PathBuf};

use energy_cli::{
    app,
    config::AdvisorConfig,
    document::{self, DocumentLayout},
    form::ProfileForm,
    profile_csv,
    report_view::OutputFormat,
};
use energy_core::{EnginePolicy, EstimationEngine, SubsidySourceConfig, SubsidyTable};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_table() -> SubsidyTable {
    app::load_subsidies(&SubsidySourceConfig {
        format: "json".to_string(),
        location: Some(fixture("municipal_subsidies.json")),
    })
    .expect("fixture subsidies should load")
}

#[test]
fn config_fixture_loads() {
    let config = AdvisorConfig::load(&fixture("advisor.toml")).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.policy, EnginePolicy::default());
    assert_eq!(
        config.export.layout,
        DocumentLayout {
            page_height_mm: 100.0,
            ..DocumentLayout::default()
        }
    );
}

#[test]
fn estimate_scenario_b_from_form_input() {
    let form = ProfileForm {
        dwelling_type: "detached".to_string(),
        floor_area: "150".to_string(),
        build_year: "1978".to_string(),
        upgraded: "no".to_string(),
        occupants: "4".to_string(),
        usage_level: "high".to_string(),
        municipality: "Oslo".to_string(),
    };
    let mut out = Vec::new();

    let report = app::run_estimate(
        &form,
        &fixture_table(),
        &EnginePolicy::default(),
        OutputFormat::Json,
        &mut out,
    )
    .unwrap();

    assert_eq!(report.estimated_annual_consumption_kwh, 28000);
    assert_eq!(report.totals.total_subsidy, dec!(29000));
    assert_eq!(report.totals.payback_years.to_string(), "22.2");

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["measures"][0]["municipal_subsidy"], "10000");
}

#[test]
fn batch_fixture_runs_every_profile() {
    let profiles = profile_csv::load_from_file(&fixture("profiles.csv")).unwrap();
    let engine_policy = EnginePolicy::default();
    let engine = EstimationEngine::new(&engine_policy);
    let table = fixture_table();

    let paybacks: Vec<String> = profiles
        .iter()
        .map(|row| {
            let profile = row.as_ref().unwrap();
            let report = engine.generate_report(profile, &table).unwrap();
            report.totals.payback_years.to_string()
        })
        .collect();
    assert_eq!(paybacks, vec!["22.2", "32.0", "28.9"]);

    let mut out = Vec::new();
    let summary = app::run_batch(
        &profiles,
        &table,
        &engine_policy,
        OutputFormat::Text,
        &mut out,
    )
    .unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("=== Profile 3 ==="));
    assert!(text.contains("Estimated annual consumption: 9100 kWh"));
}

#[test]
fn batch_with_a_rejected_row_still_estimates_the_others() {
    let rows = profile_csv::load_from_file(&fixture("profiles_with_invalid_row.csv")).unwrap();
    let mut out = Vec::new();

    let summary = app::run_batch(
        &rows,
        &fixture_table(),
        &EnginePolicy::default(),
        OutputFormat::Json,
        &mut out,
    )
    .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["report"]["estimated_annual_consumption_kwh"], 28000);
    assert!(value[1]["report"].is_null());
    assert!(
        value[1]["error"]
            .as_str()
            .unwrap()
            .contains("Floor area must be greater than zero")
    );
    assert_eq!(value[2]["report"]["estimated_annual_consumption_kwh"], 9100);
}

#[test]
fn municipalities_come_from_the_data_file() {
    let mut out = Vec::new();

    app::list_municipalities(&fixture_table(), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Bergen\nOslo\nTrondheim\n");
}

#[test]
fn export_uses_configured_layout() {
    let config = AdvisorConfig::load(&fixture("advisor.toml")).unwrap();
    let profiles = profile_csv::load_from_file(&fixture("profiles.csv")).unwrap();
    let profile = profiles[0].as_ref().unwrap();
    let report = EstimationEngine::new(&config.policy)
        .generate_report(profile, &fixture_table())
        .unwrap();
    let path = std::env::temp_dir().join(format!(
        "advisor-integration-{}.txt",
        std::process::id()
    ));

    let document = document::export_to_file(&report, config.export.layout, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(document.pages.len(), 2);
    assert_eq!(written.matches('\x0c').count(), 1);
    assert!(written.contains("Payback time: 22.2 years"));
}
