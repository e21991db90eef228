//! One station lookup, from free text to a finished board.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::mtr::ScheduleSource;
use crate::stations::{ResolveError, Station, StationDirectory, resolve};

use super::aggregate::ArrivalBoard;
use super::fanout::{LineFailure, fetch_all, partition};

/// How a lookup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Every line answered and there is something to show.
    AllOk,
    /// Some lines failed; the rest are shown.
    PartialFailure { failed: usize },
    /// At least one line answered, but no trains came back.
    NoData { failed: usize },
    /// No line answered.
    AllFailed { failed: usize },
    /// The query did not name a known station.
    Unresolved(ResolveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Error,
}

/// A line of text to show next to (or instead of) the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Everything a presenter needs for one lookup.
#[derive(Debug)]
pub struct LookupReport {
    pub query: String,
    pub station: Option<Station>,
    pub board: ArrivalBoard,
    pub failures: Vec<LineFailure>,
    pub outcome: LookupOutcome,
}

impl LookupReport {
    fn unresolved(query: &str, error: ResolveError) -> Self {
        Self {
            query: query.to_string(),
            station: None,
            board: ArrivalBoard::default(),
            failures: Vec::new(),
            outcome: LookupOutcome::Unresolved(error),
        }
    }

    /// Name to use in messages: the station's, or the query as typed.
    pub fn station_name(&self) -> &str {
        self.station
            .as_ref()
            .map_or(self.query.trim(), |s| s.name.as_str())
    }

    /// Whether rows should be drawn.
    pub fn shows_board(&self) -> bool {
        !self.board.is_empty()
    }

    /// Message for the status area, if any.
    pub fn status(&self) -> Option<StatusMessage> {
        match &self.outcome {
            LookupOutcome::AllOk => None,
            LookupOutcome::PartialFailure { failed } => Some(StatusMessage::info(format!(
                "Displayed available data. {failed} line(s) failed to load or had no service."
            ))),
            LookupOutcome::NoData { .. } => Some(StatusMessage::info(format!(
                "No train services found for \"{}\".",
                self.station_name()
            ))),
            LookupOutcome::AllFailed { .. } => Some(StatusMessage::error(format!(
                "Could not fetch any valid ETA data for \"{}\". The MTR API might be \
                 unavailable, the station has no current services, or the input was invalid.",
                self.station_name()
            ))),
            LookupOutcome::Unresolved(e) => Some(StatusMessage::error(e.to_string())),
        }
    }
}

/// Classify a finished fan-out.
pub fn classify(lines: usize, failed: usize, rows: usize) -> LookupOutcome {
    if failed == lines {
        LookupOutcome::AllFailed { failed }
    } else if rows == 0 {
        LookupOutcome::NoData { failed }
    } else if failed > 0 {
        LookupOutcome::PartialFailure { failed }
    } else {
        LookupOutcome::AllOk
    }
}

/// Resolves queries and builds boards from a schedule source.
#[derive(Debug, Clone)]
pub struct LookupService<S> {
    source: S,
    directory: &'static StationDirectory,
    timeout: Duration,
}

impl<S: ScheduleSource> LookupService<S> {
    pub fn new(source: S, directory: &'static StationDirectory, timeout: Duration) -> Self {
        Self {
            source,
            directory,
            timeout,
        }
    }

    pub fn directory(&self) -> &'static StationDirectory {
        self.directory
    }

    /// Run one lookup end to end. Never fails; problems are reported in
    /// the outcome.
    pub async fn lookup(&self, query: &str) -> LookupReport {
        let code = match resolve(self.directory, query) {
            Ok(code) => code,
            Err(e) => {
                info!(query = query.trim(), error = %e, "station not resolved");
                return LookupReport::unresolved(query, e);
            }
        };

        let Some(station) = self.directory.get(&code).cloned() else {
            return LookupReport::unresolved(
                query,
                ResolveError::NotFound {
                    query: query.trim().to_string(),
                },
            );
        };

        let outcomes = fetch_all(&self.source, &station.lines, self.timeout).await;
        let (successes, failures) = partition(outcomes);

        let board = ArrivalBoard::build(
            successes.iter().map(|(binding, response)| (*binding, response)),
            self.directory,
        );
        let outcome = classify(station.lines.len(), failures.len(), board.rows.len());

        info!(
            sta = %station.code,
            lines = station.lines.len(),
            failed = failures.len(),
            rows = board.rows.len(),
            ?outcome,
            "lookup complete"
        );

        LookupReport {
            query: query.to_string(),
            station: Some(station),
            board,
            failures,
            outcome,
        }
    }
}
