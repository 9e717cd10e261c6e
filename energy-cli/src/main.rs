use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use energy_cli::{
    app,
    config::AdvisorConfig,
    document,
    form::ProfileForm,
    logging, profile_csv,
    report_view::OutputFormat,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Household energy advisor.
///
/// Estimates annual energy consumption, the savings of attic insulation and
/// a heat pump, the public subsidies available, and the payback time.
#[derive(Debug, Parser)]
#[command(name = "energy-advisor", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Municipal subsidy data file. Overrides `[subsidies].location`.
    #[arg(long, global = true)]
    subsidies: Option<PathBuf>,

    /// Format of the subsidy data file (`json` or `csv`).
    #[arg(long, global = true)]
    subsidy_format: Option<String>,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate a single household.
    Estimate {
        /// detached, terraced or apartment.
        #[arg(long, default_value = "")]
        dwelling: String,

        /// Heated floor area in square metres.
        #[arg(long, default_value = "")]
        area: String,

        #[arg(long, default_value = "")]
        build_year: String,

        /// yes or no.
        #[arg(long, default_value = "")]
        upgraded: String,

        #[arg(long, default_value = "")]
        occupants: String,

        /// low, medium or high.
        #[arg(long, default_value = "")]
        usage: String,

        #[arg(long, default_value = "")]
        municipality: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the paginated report document. Without a path the
        /// configured export file is used.
        #[arg(long, num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },

    /// Estimate every household in a profile CSV.
    Batch {
        #[arg(long)]
        profiles: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the municipalities with subsidy data.
    Municipalities,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref().unwrap_or("info"));
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }

    let mut config = match &cli.config {
        Some(path) => {
            let config = AdvisorConfig::load(path)?;
            debug!(path = %path.display(), "loaded configuration");
            config
        }
        None => AdvisorConfig::default(),
    };
    if let Some(location) = cli.subsidies {
        config.subsidies.location = Some(location);
    }
    if let Some(format) = cli.subsidy_format {
        config.subsidies.format = format;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }

    logging::apply_config(&config.logging)?;
    debug!(?config, "effective configuration");

    let table = app::load_subsidies(&config.subsidies)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Estimate {
            dwelling,
            area,
            build_year,
            upgraded,
            occupants,
            usage,
            municipality,
            format,
            export,
        } => {
            let form = ProfileForm {
                dwelling_type: dwelling,
                floor_area: area,
                build_year,
                upgraded,
                occupants,
                usage_level: usage,
                municipality,
            };
            let report = app::run_estimate(&form, &table, &config.policy, format, &mut stdout)?;

            if let Some(path) = export {
                let path = path.unwrap_or_else(|| config.export.output.clone());
                document::export_to_file(&report, config.export.layout, &path)
                    .with_context(|| format!("exporting report to {}", path.display()))?;
                info!(path = %path.display(), "report document written");
            }
        }
        Command::Batch { profiles, format } => {
            let profiles = profile_csv::load_from_file(&profiles)?;
            let summary =
                app::run_batch(&profiles, &table, &config.policy, format, &mut stdout)?;
            if summary.failed > 0 {
                anyhow::bail!(
                    "{} of {} profiles could not be estimated",
                    summary.failed,
                    summary.failed + summary.succeeded
                );
            }
        }
        Command::Municipalities => app::list_municipalities(&table, &mut stdout)?,
    }

    Ok(())
}
