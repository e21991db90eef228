//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::{DisplayRow, LookupOutcome, LookupReport, StatusMessage};
use crate::stations::Station;

/// Query for an arrival board.
#[derive(Debug, Deserialize)]
pub struct EtaRequest {
    /// Station name or code, as typed
    #[serde(default)]
    pub station: String,
}

/// Outcome of a lookup, flattened for JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    AllOk,
    PartialFailure,
    NoData,
    AllFailed,
    Unresolved,
}

impl From<&LookupOutcome> for OutcomeKind {
    fn from(outcome: &LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::AllOk => OutcomeKind::AllOk,
            LookupOutcome::PartialFailure { .. } => OutcomeKind::PartialFailure,
            LookupOutcome::NoData { .. } => OutcomeKind::NoData,
            LookupOutcome::AllFailed { .. } => OutcomeKind::AllFailed,
            LookupOutcome::Unresolved(_) => OutcomeKind::Unresolved,
        }
    }
}

/// A line that failed during a lookup.
#[derive(Debug, Serialize)]
pub struct LineFailureResult {
    pub line: String,
    pub error: String,
}

/// JSON answer to `/eta`.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub query: String,

    /// Resolved station, absent when the query did not resolve
    pub station: Option<StationResult>,

    pub outcome: OutcomeKind,

    /// Number of lines that failed
    pub failed_lines: usize,

    pub failures: Vec<LineFailureResult>,

    pub status: Option<StatusMessage>,

    pub rows: Vec<DisplayRow>,

    /// "Data as of" text, e.g. "16 Oct 2026, 14:03:05"
    pub as_of: Option<String>,
}

impl LookupResponse {
    pub fn from_report(report: &LookupReport) -> Self {
        Self {
            query: report.query.clone(),
            station: report.station.as_ref().map(StationResult::from_station),
            outcome: OutcomeKind::from(&report.outcome),
            failed_lines: report.failures.len(),
            failures: report
                .failures
                .iter()
                .map(|f| LineFailureResult {
                    line: f.binding.line.to_string(),
                    error: f.error.to_string(),
                })
                .collect(),
            status: report.status(),
            rows: report.board.rows.clone(),
            as_of: report.board.as_of.map(|t| t.as_of_display()),
        }
    }
}

/// A station in the directory listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station code (e.g., "CEN")
    pub code: String,

    /// Display name
    pub name: String,

    /// Codes of the lines serving it
    pub lines: Vec<String>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.code.to_string(),
            name: station.name.clone(),
            lines: station.lines.iter().map(|b| b.line.to_string()).collect(),
        }
    }
}

/// Station directory listing.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
