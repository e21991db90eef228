//! Application state for the web layer.

use std::sync::Arc;

use crate::board::LookupService;
use crate::mtr::ScheduleBackend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station lookups against the configured schedule backend
    pub lookups: Arc<LookupService<ScheduleBackend>>,
}

impl AppState {
    pub fn new(lookups: LookupService<ScheduleBackend>) -> Self {
        Self {
            lookups: Arc::new(lookups),
        }
    }
}
