//! Terminal presenter.

use std::fmt::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::board::{DisplayRow, LookupReport, LookupService, LookupTracker, MAX_ETAS, StatusLevel};
use crate::mtr::ScheduleSource;

const HEADERS: [&str; COLUMNS] = [
    "Line",
    "Destination",
    "Plat.",
    "ETA 1",
    "ETA 2",
    "ETA 3",
    "ETA 4",
    "Sched. Time",
    "Remarks",
];

const COLUMNS: usize = 3 + MAX_ETAS + 2;

/// Render a finished lookup as plain text.
pub fn render_report(report: &LookupReport) -> String {
    let mut out = String::new();

    if let Some(status) = report.status() {
        let tag = match status.level {
            StatusLevel::Info => "note",
            StatusLevel::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", status.text);
    }

    if !report.shows_board() {
        return out;
    }

    if let Some(station) = &report.station {
        let _ = writeln!(out, "{} ({})", station.name, station.code);
        let _ = writeln!(out);
    }

    out.push_str(&render_table(&report.board.rows));

    if report.board.rows.iter().any(|r| r.not_live) {
        let _ = writeln!(out, "* scheduled time, not a live estimate");
    }
    if let Some(as_of) = report.board.as_of {
        let _ = writeln!(out, "Data as of {}", as_of.as_of_display());
    }

    out
}

fn row_cells(row: &DisplayRow) -> [String; COLUMNS] {
    let [eta1, eta2, eta3, eta4] = row.etas.map(|cell| cell.to_string());
    let scheduled = if row.not_live {
        format!("{}*", row.scheduled_time)
    } else {
        row.scheduled_time.clone()
    };
    [
        row.line_name.to_string(),
        row.destination_name.clone(),
        row.platform_text().to_string(),
        eta1,
        eta2,
        eta3,
        eta4,
        scheduled,
        row.remark_text(),
    ]
}

/// Left-aligned columns separated by two spaces.
fn render_table(rows: &[DisplayRow]) -> String {
    let header: [String; COLUMNS] = std::array::from_fn(|i| HEADERS[i].to_string());
    let body: Vec<[String; COLUMNS]> = rows.iter().map(row_cells).collect();

    let mut widths = [0usize; COLUMNS];
    for cells in std::iter::once(&header).chain(&body) {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(&body) {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Read station names from stdin, one per line, printing a board for each.
///
/// A new line supersedes any lookup still in flight: the old task is
/// aborted, and if it finishes anyway its result is discarded.
pub async fn run_interactive<S>(service: Arc<LookupService<S>>) -> std::io::Result<()>
where
    S: ScheduleSource + Send + Sync + 'static,
{
    let tracker = Arc::new(LookupTracker::new());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<JoinHandle<()>> = None;

    println!("Enter a station name or code (Ctrl-D to quit).");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        let ticket = tracker.begin();
        let tracker = tracker.clone();
        let service = service.clone();

        in_flight = Some(tokio::spawn(async move {
            let report = service.lookup(&line).await;
            if tracker.is_current(ticket) {
                println!("{}", render_report(&report));
            } else {
                debug!(query = %line, "discarding superseded lookup");
            }
        }));
    }

    if let Some(last) = in_flight {
        let _ = last.await;
    }

    Ok(())
}
