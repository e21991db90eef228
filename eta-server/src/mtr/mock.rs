//! Mock MTR client for running without network access.
//!
//! Loads sample schedule responses from JSON files and serves them as if
//! they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use reqwest::StatusCode;

use crate::domain::{LineCode, StationCode};
use crate::stations::LineBinding;

use super::client::parse_schedule_body;
use super::error::MtrError;
use super::types::ScheduleResponse;

/// Mock client that serves schedules from JSON files.
#[derive(Debug, Clone)]
pub struct MockMtrClient {
    /// Pre-loaded responses, keyed by binding.
    schedules: Arc<HashMap<LineBinding, ScheduleResponse>>,
}

impl MockMtrClient {
    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{LINE}-{STA}.json` (e.g. `TWL-CEN.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MtrError> {
        let data_dir = data_dir.as_ref();
        let mut schedules = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            MtrError::NotConfigured(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                MtrError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let binding = parse_file_stem(stem).ok_or_else(|| {
                MtrError::NotConfigured(format!("invalid mock file name: {:?}", path))
            })?;

            let body = std::fs::read_to_string(&path)
                .map_err(|e| MtrError::NotConfigured(format!("failed to read {:?}: {e}", path)))?;

            let schedule = parse_schedule_body(StatusCode::OK, &body)?;
            schedules.insert(binding, schedule);
        }

        if schedules.is_empty() {
            return Err(MtrError::NotConfigured(format!(
                "no mock schedule files found in {:?}",
                data_dir
            )));
        }

        Ok(Self {
            schedules: Arc::new(schedules),
        })
    }

    /// Serve the stored schedule for a binding, 404 if there is none.
    pub async fn get_schedule(&self, binding: LineBinding) -> Result<ScheduleResponse, MtrError> {
        self.schedules
            .get(&binding)
            .cloned()
            .ok_or_else(|| MtrError::Status {
                status: 404,
                body: format!("no mock data for {}", binding.schedule_key()),
            })
    }

    /// Bindings with mock data available.
    pub fn available(&self) -> Vec<LineBinding> {
        let mut bindings: Vec<_> = self.schedules.keys().copied().collect();
        bindings.sort_by_key(|b| (b.station, b.line));
        bindings
    }
}

/// `"TWL-CEN"` → (TWL, CEN).
fn parse_file_stem(stem: &str) -> Option<LineBinding> {
    let (line, station) = stem.split_once('-')?;
    let line: LineCode = line.parse().ok()?;
    let station = StationCode::parse(station).ok()?;
    Some(LineBinding::new(line, station))
}
