//! Paginated document export.
//!
//! A report is first laid out as positioned text on A4-sized pages
//! ([`build_document`]), then rasterized to a fixed character grid
//! ([`render_text`]). Pages in the rendered text are separated by a form
//! feed.
//!
//! | Element                | Position (mm)           | Size |
//! |------------------------|-------------------------|------|
//! | Title                  | (20, 20)                | 16   |
//! | Consumption            | (20, 40)                | 12   |
//! | Measure `i` heading    | (20, 50 + 20i)          | 12   |
//! | Measure `i` detail     | (30, 58 + 20i)          | 12   |
//! | Totals                 | (20, 110), 10 mm apart  | 12   |

use std::path::{Path, PathBuf};

use energy_core::EnergyReport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::format_money;

pub const DEFAULT_EXPORT_FILE: &str = "energy-report.txt";

pub const TITLE: &str = "Energy advisory report";
const TITLE_SIZE: u8 = 16;
const BODY_SIZE: u8 = 12;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write document to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page layout: {0}")]
    Layout(String),
}

/// Page geometry and the grid used when rasterizing to text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLayout {
    pub page_height_mm: f64,
    pub top_margin_mm: f64,
    pub bottom_margin_mm: f64,
    /// Millimetres covered by one text row.
    pub mm_per_row: f64,
    /// Millimetres covered by one text column.
    pub mm_per_column: f64,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            page_height_mm: 297.0,
            top_margin_mm: 20.0,
            bottom_margin_mm: 20.0,
            mm_per_row: 5.0,
            mm_per_column: 2.5,
        }
    }
}

impl DocumentLayout {
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.mm_per_row <= 0.0 || self.mm_per_column <= 0.0 {
            return Err(ExportError::Layout(
                "grid cell size must be greater than zero".to_string(),
            ));
        }
        if self.top_margin_mm < 0.0 || self.bottom_margin_mm < 0.0 {
            return Err(ExportError::Layout("margins must be non-negative".to_string()));
        }
        if self.top_margin_mm >= self.page_height_mm - self.bottom_margin_mm {
            return Err(ExportError::Layout(format!(
                "margins {} + {} leave no room on a {} mm page",
                self.top_margin_mm, self.bottom_margin_mm, self.page_height_mm
            )));
        }
        Ok(())
    }

    fn last_line_mm(&self) -> f64 {
        self.page_height_mm - self.bottom_margin_mm
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub x: f64,
    pub y: f64,
    pub size: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub layout: DocumentLayout,
    pub pages: Vec<Page>,
}

/// The report's lines at their absolute positions, before pagination.
fn report_lines(report: &EnergyReport) -> Vec<TextLine> {
    let line = |x: f64, y: f64, size: u8, text: String| TextLine { x, y, size, text };

    let mut lines = vec![
        line(20.0, 20.0, TITLE_SIZE, TITLE.to_string()),
        line(
            20.0,
            40.0,
            BODY_SIZE,
            format!(
                "Estimated annual energy consumption: {} kWh",
                report.estimated_annual_consumption_kwh
            ),
        ),
    ];

    for (i, measure) in report.measures.iter().enumerate() {
        let offset = 20.0 * i as f64;
        lines.push(line(
            20.0,
            50.0 + offset,
            BODY_SIZE,
            format!("Measure {}: {}", i + 1, measure.name),
        ));
        lines.push(line(
            30.0,
            58.0 + offset,
            BODY_SIZE,
            format!(
                "Savings: {} kWh/year, national subsidy: {}, municipal subsidy: {}",
                measure.annual_savings_kwh,
                format_money(measure.national_subsidy),
                format_money(measure.municipal_subsidy)
            ),
        ));
    }

    let totals = &report.totals;
    let summary = [
        format!("Total investment cost: {}", format_money(totals.total_capital_cost)),
        format!("Public subsidies in total: {}", format_money(totals.total_subsidy)),
        format!("Annual savings: {} kWh", totals.total_annual_savings_kwh),
        format!("Payback time: {} years", totals.payback_years),
    ];
    for (i, text) in summary.into_iter().enumerate() {
        lines.push(line(20.0, 110.0 + 10.0 * i as f64, BODY_SIZE, text));
    }

    lines
}

/// Lay the report out on pages.
///
/// A line whose position falls below the bottom margin opens a new page;
/// it and every later line shift up so the line lands on the top margin.
pub fn build_document(
    report: &EnergyReport,
    layout: DocumentLayout,
) -> Result<Document, ExportError> {
    layout.validate()?;

    let mut pages = vec![Page::default()];
    let mut shift = 0.0;
    for mut line in report_lines(report) {
        if line.y - shift > layout.last_line_mm() {
            shift = line.y - layout.top_margin_mm;
            pages.push(Page::default());
        }
        line.y -= shift;
        if let Some(page) = pages.last_mut() {
            page.lines.push(line);
        }
    }

    tracing::debug!(pages = pages.len(), "laid out report document");
    Ok(Document { layout, pages })
}

fn render_page(
    page: &Page,
    layout: &DocumentLayout,
) -> String {
    let mut grid: Vec<Vec<char>> = Vec::new();
    for line in &page.lines {
        let row = (line.y / layout.mm_per_row).round() as usize;
        let col = (line.x / layout.mm_per_column).round() as usize;
        if grid.len() <= row {
            grid.resize(row + 1, Vec::new());
        }
        let cells = &mut grid[row];
        for (i, ch) in line.text.chars().enumerate() {
            let at = col + i;
            if cells.len() <= at {
                cells.resize(at + 1, ' ');
            }
            cells[at] = ch;
        }
    }

    let mut out = String::new();
    for cells in &grid {
        let row: String = cells.iter().collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Rasterize every page to text. Pages are joined with a form feed.
pub fn render_text(document: &Document) -> String {
    document
        .pages
        .iter()
        .map(|page| render_page(page, &document.layout))
        .collect::<Vec<_>>()
        .join("\x0c")
}

/// Lay out, render and write the report to `path`.
pub fn export_to_file(
    report: &EnergyReport,
    layout: DocumentLayout,
    path: &Path,
) -> Result<Document, ExportError> {
    let document = build_document(report, layout)?;
    std::fs::write(path, render_text(&document)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), pages = document.pages.len(), "exported report");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::{EnginePolicy, EstimationEngine, HouseholdProfile, SubsidyTable};
    use pretty_assertions::assert_eq;

    fn scenario_a_report() -> EnergyReport {
        let policy = EnginePolicy::default();
        let profile = HouseholdProfile {
            floor_area_sqm: 100,
            occupant_count: 2,
            ..HouseholdProfile::default()
        };
        EstimationEngine::new(&policy)
            .generate_report(&profile, &SubsidyTable::default())
            .unwrap()
    }

    fn positions(page: &Page) -> Vec<(f64, f64)> {
        page.lines.iter().map(|l| (l.x, l.y)).collect()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn build_document_places_lines_on_one_a4_page() {
        let document = build_document(&scenario_a_report(), DocumentLayout::default()).unwrap();

        assert_eq!(document.pages.len(), 1);
        assert_eq!(
            positions(&document.pages[0]),
            vec![
                (20.0, 20.0),
                (20.0, 40.0),
                (20.0, 50.0),
                (30.0, 58.0),
                (20.0, 70.0),
                (30.0, 78.0),
                (20.0, 110.0),
                (20.0, 120.0),
                (20.0, 130.0),
                (20.0, 140.0),
            ]
        );
    }

    #[test]
    fn build_document_line_text() {
        let document = build_document(&scenario_a_report(), DocumentLayout::default()).unwrap();
        let texts: Vec<&str> = document.pages[0].lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(texts[0], TITLE);
        assert_eq!(texts[1], "Estimated annual energy consumption: 17000 kWh");
        assert_eq!(texts[2], "Measure 1: Attic insulation");
        assert_eq!(
            texts[3],
            "Savings: 2200 kWh/year, national subsidy: 8000 kr, municipal subsidy: 0 kr"
        );
        assert_eq!(texts[4], "Measure 2: Heat pump installation");
        assert_eq!(texts[6], "Total investment cost: 65000 kr");
        assert_eq!(texts[7], "Public subsidies in total: 13000 kr");
        assert_eq!(texts[8], "Annual savings: 6500 kWh");
        assert_eq!(texts[9], "Payback time: 32.0 years");
        assert_eq!(document.pages[0].lines[0].size, 16);
        assert_eq!(document.pages[0].lines[1].size, 12);
    }

    #[test]
    fn build_document_paginates_past_bottom_margin() {
        let layout = DocumentLayout {
            page_height_mm: 100.0,
            ..DocumentLayout::default()
        };

        let document = build_document(&scenario_a_report(), layout).unwrap();

        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.pages[0].lines.len(), 6);
        assert_eq!(
            positions(&document.pages[1]),
            vec![(20.0, 20.0), (20.0, 30.0), (20.0, 40.0), (20.0, 50.0)]
        );
    }

    #[test]
    fn build_document_rejects_degenerate_layout() {
        let layout = DocumentLayout {
            page_height_mm: 30.0,
            ..DocumentLayout::default()
        };

        let err = build_document(&scenario_a_report(), layout).unwrap_err();

        assert!(matches!(err, ExportError::Layout(_)));
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn render_text_maps_positions_to_grid() {
        let document = build_document(&scenario_a_report(), DocumentLayout::default()).unwrap();
        let text = render_text(&document);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[4], format!("{}{TITLE}", " ".repeat(8)));
        assert_eq!(
            rows[8],
            "        Estimated annual energy consumption: 17000 kWh"
        );
        assert!(rows[12].starts_with("            Savings: 2200 kWh/year"));
        assert_eq!(rows[28], "        Payback time: 32.0 years");
        assert_eq!(rows.len(), 29);
        assert!(!text.contains('\x0c'));
    }

    #[test]
    fn render_text_separates_pages_with_form_feed() {
        let layout = DocumentLayout {
            page_height_mm: 100.0,
            ..DocumentLayout::default()
        };
        let document = build_document(&scenario_a_report(), layout).unwrap();

        let text = render_text(&document);
        let pages: Vec<&str> = text.split('\x0c').collect();

        assert_eq!(pages.len(), 2);
        assert!(pages[1].contains("Total investment cost: 65000 kr"));
        assert!(!pages[0].contains("Total investment cost"));
    }

    #[test]
    fn export_to_file_writes_rendered_document() {
        let path = std::env::temp_dir().join(format!(
            "energy-report-export-{}.txt",
            std::process::id()
        ));

        let document =
            export_to_file(&scenario_a_report(), DocumentLayout::default(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(written, render_text(&document));
    }

    #[test]
    fn export_to_missing_directory_is_io_error() {
        let path = Path::new("no/such/dir/energy-report.txt");

        let err = export_to_file(&scenario_a_report(), DocumentLayout::default(), path)
            .unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
    }
}
