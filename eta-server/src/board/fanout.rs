//! Concurrent fetch of every line serving a station.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::mtr::{MtrError, ScheduleResponse, ScheduleSource};
use crate::stations::LineBinding;

/// Result of fetching one line.
#[derive(Debug)]
pub struct LineOutcome {
    pub binding: LineBinding,
    pub result: Result<ScheduleResponse, MtrError>,
}

/// A line that contributed nothing to the board.
#[derive(Debug)]
pub struct LineFailure {
    pub binding: LineBinding,
    pub error: MtrError,
}

/// Fetch all bindings at once and wait for every one to settle.
///
/// Each call is bounded by `timeout`. A response whose own status flag is
/// not a success is turned into [`MtrError::Rejected`], so callers only see
/// `Ok` for usable payloads. Outcomes are returned in binding order.
pub async fn fetch_all<S: ScheduleSource>(
    source: &S,
    bindings: &[LineBinding],
    timeout: Duration,
) -> Vec<LineOutcome> {
    let futures = bindings.iter().map(|&binding| async move {
        let result = match tokio::time::timeout(timeout, source.fetch_schedule(binding)).await {
            Ok(Ok(response)) if response.status.succeeded() => Ok(response),
            Ok(Ok(response)) => Err(MtrError::Rejected {
                message: response.message,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(MtrError::Timeout { after: timeout }),
        };

        match &result {
            Err(e) if e.is_rejection() => {
                debug!(line = %binding.line, sta = %binding.station, error = %e, "line has no service");
            }
            Err(e) => {
                warn!(line = %binding.line, sta = %binding.station, error = %e, "line fetch failed");
            }
            Ok(_) => {}
        }

        LineOutcome { binding, result }
    });

    join_all(futures).await
}

/// Split outcomes into usable responses and failures, keeping order.
pub fn partition(
    outcomes: Vec<LineOutcome>,
) -> (Vec<(LineBinding, ScheduleResponse)>, Vec<LineFailure>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for LineOutcome { binding, result } in outcomes {
        match result {
            Ok(response) => successes.push((binding, response)),
            Err(error) => failures.push(LineFailure { binding, error }),
        }
    }

    (successes, failures)
}
