//! MTR Next Train API client.
//!
//! This module provides an HTTP client for the Hong Kong open data
//! `getSchedule.php` endpoint, which reports the next few trains for one
//! line at one station.
//!
//! Key characteristics of the API:
//! - One request covers exactly one (line, station) pair; interchange
//!   stations need one request per line
//! - The schedule payload's layout differs between lines (see
//!   [`crate::board::normalize`])
//! - Failure can be reported in-band through a `status` flag of `0`

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, MtrClient, MtrConfig, parse_schedule_body};
pub use error::MtrError;
pub use mock::MockMtrClient;
pub use source::{ScheduleBackend, ScheduleSource};
pub use types::{ApiStatus, ScheduleResponse, TrainDto};
