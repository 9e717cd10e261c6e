use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use energy_data::{CsvSubsidySource, write_json};

/// Convert a municipal subsidy sheet from CSV into the JSON data file the
/// advisor loads at startup.
///
/// The CSV file should have the following columns:
/// - municipality: exact municipality name
/// - attic_insulation (or loft): subsidy amount, empty for none
/// - heat_pump (or varmepumpe): subsidy amount, empty for none
#[derive(Parser, Debug)]
#[command(name = "subsidy-convert")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing subsidy data
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the JSON data file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = CsvSubsidySource::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    eprintln!("Parsed {} records from CSV", records.len());

    let table = CsvSubsidySource::into_table(records).context("Invalid subsidy data")?;

    match &args.output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            let mut writer = BufWriter::new(out);
            write_json(&table, &mut writer).context("Failed to write JSON")?;
            writer.flush()?;
            eprintln!(
                "Wrote {} municipalities to {}",
                table.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_json(&table, &mut stdout).context("Failed to write JSON")?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
