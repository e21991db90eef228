//! The seam between the lookup pipeline and wherever schedules come from.

use std::future::Future;

use crate::stations::LineBinding;

use super::client::MtrClient;
use super::error::MtrError;
use super::mock::MockMtrClient;
use super::types::ScheduleResponse;

/// Something that can produce one line's schedule at one station.
pub trait ScheduleSource {
    fn fetch_schedule(
        &self,
        binding: LineBinding,
    ) -> impl Future<Output = Result<ScheduleResponse, MtrError>> + Send;
}

impl ScheduleSource for MtrClient {
    fn fetch_schedule(
        &self,
        binding: LineBinding,
    ) -> impl Future<Output = Result<ScheduleResponse, MtrError>> + Send {
        self.get_schedule(binding)
    }
}

impl ScheduleSource for MockMtrClient {
    fn fetch_schedule(
        &self,
        binding: LineBinding,
    ) -> impl Future<Output = Result<ScheduleResponse, MtrError>> + Send {
        self.get_schedule(binding)
    }
}

/// Live or mock backend, chosen at startup.
#[derive(Debug, Clone)]
pub enum ScheduleBackend {
    Live(MtrClient),
    Mock(MockMtrClient),
}

impl ScheduleSource for ScheduleBackend {
    async fn fetch_schedule(&self, binding: LineBinding) -> Result<ScheduleResponse, MtrError> {
        match self {
            ScheduleBackend::Live(client) => client.get_schedule(binding).await,
            ScheduleBackend::Mock(client) => client.get_schedule(binding).await,
        }
    }
}
