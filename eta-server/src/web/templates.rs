//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{DisplayRow, EtaCell, LookupReport, StatusLevel};
use crate::stations::StationDirectory;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the station form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationOption>,
}

impl IndexTemplate {
    pub fn new(directory: &StationDirectory) -> Self {
        Self {
            stations: directory
                .iter()
                .map(|s| StationOption {
                    code: s.code.to_string(),
                    name: s.name.clone(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Fragment Templates (htmx responses, no base.html)
// ============================================================================

/// Arrival board fragment.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Autocomplete entry.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub code: String,
    pub name: String,
}

/// Banner above the board.
#[derive(Debug, Clone)]
pub struct StatusView {
    /// CSS modifier: "info" or "error"
    pub class: &'static str,
    pub text: String,
}

/// Whole board as the template sees it.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub heading: Option<String>,
    pub status: Option<StatusView>,
    pub rows: Vec<RowView>,
    pub as_of: Option<String>,
}

impl BoardView {
    pub fn from_report(report: &LookupReport) -> Self {
        let status = report.status().map(|s| StatusView {
            class: match s.level {
                StatusLevel::Info => "info",
                StatusLevel::Error => "error",
            },
            text: s.text,
        });

        if !report.shows_board() {
            return Self {
                heading: None,
                status,
                rows: Vec::new(),
                as_of: None,
            };
        }

        Self {
            heading: report
                .station
                .as_ref()
                .map(|s| format!("{} ({})", s.name, s.code)),
            status,
            rows: report.board.rows.iter().map(RowView::from_row).collect(),
            as_of: report.board.as_of.map(|t| t.as_of_display()),
        }
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct RowView {
    /// Lower-case line code, for the colour stripe
    pub line_class: String,
    pub line_name: String,
    pub destination: String,
    pub platform: String,
    pub etas: Vec<EtaView>,
    pub scheduled_time: String,
    pub not_live: bool,
    pub remarks: String,
}

impl RowView {
    pub fn from_row(row: &DisplayRow) -> Self {
        Self {
            line_class: row.line.as_str().to_lowercase(),
            line_name: row.line_name.to_string(),
            destination: row.destination_name.clone(),
            platform: row.platform_text().to_string(),
            etas: row.etas.iter().map(EtaView::from_cell).collect(),
            scheduled_time: row.scheduled_time.clone(),
            not_live: row.not_live,
            remarks: row.remark_text(),
        }
    }
}

/// One ETA cell.
#[derive(Debug, Clone)]
pub struct EtaView {
    pub text: String,
    /// CSS modifier, empty for plain minutes
    pub class: &'static str,
}

impl EtaView {
    fn from_cell(cell: &EtaCell) -> Self {
        Self {
            text: cell.to_string(),
            class: match cell {
                EtaCell::Arriving => "arriving",
                EtaCell::Departed => "departed",
                EtaCell::Empty => "empty",
                EtaCell::Minutes(_) => "",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ArrivalBoard, LookupOutcome, Remark};
    use crate::domain::{Direction, LineCode};
    use crate::stations::ResolveError;

    fn row() -> DisplayRow {
        DisplayRow {
            line: LineCode::Twl,
            line_name: "Tsuen Wan Line",
            direction: Direction::Up,
            destination: "TSW".to_string(),
            destination_name: "Tsuen Wan".to_string(),
            platform: None,
            etas: [
                EtaCell::Departed,
                EtaCell::Minutes(5),
                EtaCell::Empty,
                EtaCell::Empty,
            ],
            scheduled_time: "14:03".to_string(),
            not_live: true,
            remarks: vec![Remark::Delayed],
            earliest_minutes: Some(0),
        }
    }

    fn report(outcome: LookupOutcome, rows: Vec<DisplayRow>) -> LookupReport {
        let directory = StationDirectory::builtin();
        LookupReport {
            query: "cen".to_string(),
            station: directory.iter().find(|s| s.code.as_str() == "CEN").cloned(),
            board: ArrivalBoard { rows, as_of: None },
            failures: Vec::new(),
            outcome,
        }
    }

    #[test]
    fn row_view_fields() {
        let view = RowView::from_row(&row());

        assert_eq!(view.line_class, "twl");
        assert_eq!(view.platform, "N/A");
        assert_eq!(view.etas.len(), 4);
        assert_eq!(view.etas[0].text, "Dep");
        assert_eq!(view.etas[0].class, "departed");
        assert_eq!(view.etas[1].class, "");
        assert_eq!(view.remarks, "Delayed");
    }

    #[test]
    fn board_fragment_renders_table() {
        let board = BoardView::from_report(&report(LookupOutcome::AllOk, vec![row()]));
        let html = BoardTemplate { board }.render().unwrap();

        assert!(html.contains("Central (CEN)"));
        assert!(html.contains("Tsuen Wan Line"));
        assert!(html.contains("Sched. Time"));
        assert!(html.contains("N/A"));
        assert!(html.contains("Dep"));
        assert!(html.contains("14:03*"));
        assert!(!html.contains("status-banner"));
    }

    #[test]
    fn unresolved_fragment_is_banner_only() {
        let mut r = report(
            LookupOutcome::Unresolved(ResolveError::EmptyQuery),
            Vec::new(),
        );
        r.station = None;

        let board = BoardView::from_report(&r);
        assert!(board.heading.is_none());

        let html = BoardTemplate { board }.render().unwrap();
        assert!(html.contains("status-banner error"));
        assert!(html.contains("Please enter a station name or code."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn index_lists_stations() {
        let html = IndexTemplate::new(StationDirectory::builtin())
            .render()
            .unwrap();
        assert!(html.contains(r#"<option value="Central">"#));
        assert!(html.contains("hx-get=\"/eta\""));
    }
}
