use std::collections::HashMap;

use tracing::{debug, info};

use super::subsidy_source::{SourceError, SubsidySource, SubsidySourceConfig};
use crate::SubsidyTable;

/// Registry of [`SubsidySource`] implementations, keyed by format name.
///
/// Typical lifetime:
/// 1. Create with `SubsidySourceRegistry::new()`.
/// 2. Call `register` once per known format.
/// 3. Call `load` once at startup to obtain the process-wide table.
pub struct SubsidySourceRegistry {
    sources: HashMap<&'static str, Box<dyn SubsidySource>>,
}

impl SubsidySourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source. A source with the same format name is replaced.
    pub fn register(&mut self, source: Box<dyn SubsidySource>) {
        self.sources.insert(source.format_name(), source);
    }

    /// Names of every registered format, sorted alphabetically.
    pub fn available_formats(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.sources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Load the subsidy table described by `config`.
    ///
    /// A config without a location yields an empty table without consulting
    /// any source.
    ///
    /// # Errors
    /// * [`SourceError::Configuration`] when no source is registered for
    ///   `config.format`.
    /// * Any error the chosen source returns.
    pub fn load(&self, config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError> {
        if config.location.is_none() {
            debug!("no subsidy data configured; using an empty table");
            return Ok(SubsidyTable::new());
        }

        let source = self.sources.get(config.format.as_str()).ok_or_else(|| {
            SourceError::Configuration(format!(
                "unknown subsidy format '{}'; available: {:?}",
                config.format,
                self.available_formats()
            ))
        })?;

        let table = source.load(config)?;
        info!(
            format = source.format_name(),
            municipalities = table.len(),
            "subsidy table loaded"
        );
        Ok(table)
    }
}

impl Default for SubsidySourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::MunicipalSubsidies;

    // ── stub sources ─────────────────────────────────────────────────────
    /// A source whose `load` flips an `AtomicBool` and returns a one-entry
    /// table, so tests can prove dispatch reached it.
    struct StubSource {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    impl SubsidySource for StubSource {
        fn format_name(&self) -> &'static str {
            self.name
        }

        fn load(&self, _config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError> {
            self.called.store(true, Ordering::SeqCst);
            Ok([(
                "Oslo".to_string(),
                MunicipalSubsidies {
                    attic_insulation: dec!(10000),
                    heat_pump: dec!(6000),
                },
            )]
            .into_iter()
            .collect())
        }
    }

    struct FailingSource;

    impl SubsidySource for FailingSource {
        fn format_name(&self) -> &'static str {
            "failing"
        }

        fn load(&self, _config: &SubsidySourceConfig) -> Result<SubsidyTable, SourceError> {
            Err(SourceError::Malformed("intentional failure".to_string()))
        }
    }

    fn stub_source(name: &'static str) -> (Box<dyn SubsidySource>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubSource {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config_for(format: &str) -> SubsidySourceConfig {
        SubsidySourceConfig {
            format: format.to_string(),
            location: Some(PathBuf::from("subsidies.data")),
        }
    }

    // ── SubsidySourceConfig ──────────────────────────────────────────────
    #[test]
    fn config_default_is_json_without_location() {
        let cfg = SubsidySourceConfig::default();
        assert_eq!(cfg.format, "json");
        assert_eq!(cfg.location, None);
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_formats() {
        assert!(SubsidySourceRegistry::new().available_formats().is_empty());
    }

    #[test]
    fn available_formats_is_sorted() {
        let mut reg = SubsidySourceRegistry::new();
        let (json, _) = stub_source("json");
        let (csv, _) = stub_source("csv");
        reg.register(json);
        reg.register(csv);
        assert_eq!(reg.available_formats(), vec!["csv", "json"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = SubsidySourceRegistry::new();
        let (old, old_called) = stub_source("json");
        let (new, new_called) = stub_source("json");
        reg.register(old);
        reg.register(new);

        reg.load(&config_for("json")).unwrap();

        assert_eq!(reg.available_formats(), vec!["json"]);
        assert!(!old_called.load(Ordering::SeqCst));
        assert!(new_called.load(Ordering::SeqCst));
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[test]
    fn load_calls_matching_source_only() {
        let mut reg = SubsidySourceRegistry::new();
        let (json, json_called) = stub_source("json");
        let (csv, csv_called) = stub_source("csv");
        reg.register(json);
        reg.register(csv);

        let table = reg.load(&config_for("csv")).unwrap();

        assert_eq!(table.municipalities(), vec!["Oslo"]);
        assert!(csv_called.load(Ordering::SeqCst));
        assert!(!json_called.load(Ordering::SeqCst));
    }

    #[test]
    fn load_without_location_returns_empty_table() {
        let mut reg = SubsidySourceRegistry::new();
        let (json, called) = stub_source("json");
        reg.register(json);

        let table = reg.load(&SubsidySourceConfig::default()).unwrap();

        assert!(table.is_empty());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn unknown_format_error_names_requested_and_available_formats() {
        let mut reg = SubsidySourceRegistry::new();
        let (json, _) = stub_source("json");
        reg.register(json);

        match reg.load(&config_for("xlsx")) {
            Err(SourceError::Configuration(msg)) => {
                assert!(msg.contains("xlsx"), "error should name the requested format");
                assert!(msg.contains("json"), "error should list available formats");
            }
            other => panic!("expected Configuration error, got {other:#?}"),
        }
    }

    #[test]
    fn load_propagates_source_error() {
        let mut reg = SubsidySourceRegistry::new();
        reg.register(Box::new(FailingSource));

        assert_eq!(
            reg.load(&config_for("failing")),
            Err(SourceError::Malformed("intentional failure".to_string()))
        );
    }
}
