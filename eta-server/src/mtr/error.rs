//! MTR client error types.

use std::time::Duration;

/// Errors from fetching one line's schedule.
#[derive(Debug, thiserror::Error)]
pub enum MtrError {
    /// HTTP request failed (network error, connection reset, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status code
    #[error("API request failed: {status}")]
    Status { status: u16, body: String },

    /// Body was not the expected JSON structure
    #[error("invalid JSON response: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Payload parsed, but its status flag reports failure
    #[error("API rejected request: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// No response within the per-call timeout
    #[error("timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl MtrError {
    /// Whether the API itself answered and refused, as opposed to the
    /// request failing on the way.
    pub fn is_rejection(&self) -> bool {
        matches!(self, MtrError::Rejected { .. })
    }
}
