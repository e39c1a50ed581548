//! Admin service implementation.

use crate::admin_service::AdminService;
use crate::dto::{EventRegistrationStatsResponse, RegistrationResponse, StatsResponse};
use crate::mappers::stats_response;
use async_trait::async_trait;
use seatbook_core::{EventId, SeatbookError, SeatbookResult};
use seatbook_repository::{EventRepository, RegistrationRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Admin service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = AdminService)]
pub struct AdminServiceComponent {
    #[shaku(inject)]
    events: Arc<dyn EventRepository>,
    #[shaku(inject)]
    registrations: Arc<dyn RegistrationRepository>,
}

impl AdminServiceComponent {
    /// Creates a new admin service.
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            registrations,
        }
    }
}

#[async_trait]
impl AdminService for AdminServiceComponent {
    async fn stats(&self) -> SeatbookResult<StatsResponse> {
        debug!("Computing system stats");

        let totals = self.events.totals().await?;
        let counts = self.registrations.count_by_status().await?;
        Ok(stats_response(totals, counts))
    }

    async fn event_registrations(
        &self,
        event_id: EventId,
    ) -> SeatbookResult<Vec<RegistrationResponse>> {
        debug!("Listing registrations of event {}", event_id);

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(SeatbookError::not_found("Event", event_id));
        }

        let registrations = self.registrations.find_by_event(event_id).await?;
        Ok(registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect())
    }

    async fn registration_stats(&self) -> SeatbookResult<Vec<EventRegistrationStatsResponse>> {
        debug!("Computing per-event registration stats");

        let stats = self.registrations.event_stats().await?;
        Ok(stats
            .into_iter()
            .map(EventRegistrationStatsResponse::from)
            .collect())
    }
}

impl std::fmt::Debug for AdminServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminServiceComponent").finish_non_exhaustive()
    }
}
