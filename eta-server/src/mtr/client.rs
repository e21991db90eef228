//! Next Train HTTP client.
//!
//! One request per (line, station) pair. Rate limiting is a semaphore, as
//! the open data endpoint throttles bursts from one address.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::stations::LineBinding;

use super::error::MtrError;
use super::types::ScheduleResponse;

/// Default base URL for the Next Train API.
pub const DEFAULT_BASE_URL: &str = "https://rt.data.gov.hk/v1/transport/mtr/getSchedule.php";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparsable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the MTR client.
#[derive(Debug, Clone)]
pub struct MtrConfig {
    /// Endpoint URL (defaults to the production API)
    pub base_url: String,
    /// Response language, `EN` or `TC`
    pub lang: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MtrConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "EN".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the response language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MtrConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Next Train API client.
#[derive(Debug, Clone)]
pub struct MtrClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
    semaphore: Arc<Semaphore>,
}

impl MtrClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MtrConfig) -> Result<Self, MtrError> {
        if config.max_concurrent == 0 {
            return Err(MtrError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            lang: config.lang,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the schedule for one line at one station.
    ///
    /// The payload's own status flag is not checked here; see
    /// [`ScheduleResponse::status`].
    pub async fn get_schedule(&self, binding: LineBinding) -> Result<ScheduleResponse, MtrError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MtrError::NotConfigured("semaphore closed".to_string()))?;

        debug!(line = %binding.line, sta = %binding.station, url = %self.base_url, "fetching schedule");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("line", binding.line.as_str()),
                ("sta", binding.station.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!(line = %binding.line, sta = %binding.station, %status, "fetch completed");

        let body = response.text().await?;
        parse_schedule_body(status, &body)
    }
}

/// Classify a raw HTTP answer: non-success status or a body that is not a
/// JSON object of the expected shape is an error.
pub fn parse_schedule_body(status: StatusCode, body: &str) -> Result<ScheduleResponse, MtrError> {
    if !status.is_success() {
        return Err(MtrError::Status {
            status: status.as_u16(),
            body: excerpt(body),
        });
    }

    let json_error = |message: String| MtrError::Json {
        message,
        body: Some(excerpt(body)),
    };

    // A derived struct deserializer also accepts arrays positionally.
    let value: Value = serde_json::from_str(body).map_err(|e| json_error(e.to_string()))?;
    if !value.is_object() {
        return Err(json_error("expected a JSON object".to_string()));
    }

    ScheduleResponse::deserialize(value).map_err(|e| json_error(e.to_string()))
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
