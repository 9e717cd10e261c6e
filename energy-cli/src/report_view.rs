//! On-screen rendering of an [`EnergyReport`].

use std::fmt;

use clap::ValueEnum;
use energy_core::EnergyReport;

use crate::utils::{format_money, opt_display};

/// How a report is written to the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Text view of a report. Rendered through `Display`.
pub struct ReportView<'a>(pub &'a EnergyReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let report = self.0;
        let profile = &report.profile;

        writeln!(f, "Household")?;
        writeln!(
            f,
            "  Dwelling type:        {}",
            opt_display(profile.dwelling_type.map(|d| d.label()))
        )?;
        writeln!(f, "  Floor area:           {} m²", profile.floor_area_sqm)?;
        writeln!(f, "  Build year:           {}", opt_display(profile.build_year))?;
        writeln!(
            f,
            "  Upgraded:             {}",
            if profile.has_been_upgraded { "yes" } else { "no" }
        )?;
        writeln!(f, "  Occupants:            {}", profile.occupant_count)?;
        writeln!(
            f,
            "  Electricity usage:    {}",
            opt_display(profile.electricity_usage.map(|u| u.label()))
        )?;
        writeln!(
            f,
            "  Municipality:         {}",
            opt_display(profile.municipality.as_deref())
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Estimated annual consumption: {} kWh",
            report.estimated_annual_consumption_kwh
        )?;

        writeln!(f)?;
        writeln!(f, "Measures")?;
        for measure in &report.measures {
            writeln!(f, "  {}", measure.name)?;
            writeln!(f, "    Investment cost:    {}", format_money(measure.capital_cost))?;
            writeln!(f, "    Annual savings:     {} kWh", measure.annual_savings_kwh)?;
            writeln!(f, "    National subsidy:   {}", format_money(measure.national_subsidy))?;
            writeln!(f, "    Municipal subsidy:  {}", format_money(measure.municipal_subsidy))?;
        }

        let totals = &report.totals;
        writeln!(f)?;
        writeln!(f, "Totals")?;
        writeln!(f, "  Investment cost:      {}", format_money(totals.total_capital_cost))?;
        writeln!(f, "  Subsidies:            {}", format_money(totals.total_subsidy))?;
        writeln!(f, "  Annual savings:       {} kWh", totals.total_annual_savings_kwh)?;
        write!(f, "  Payback time:         {} years", totals.payback_years)
    }
}

/// Pretty-printed JSON of the whole report.
pub fn render_json(report: &EnergyReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render a report in the requested format.
pub fn render(
    report: &EnergyReport,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(ReportView(report).to_string()),
        OutputFormat::Json => render_json(report),
    }
}
