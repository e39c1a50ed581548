//! Admin read models.

use crate::dto::{EventRegistrationStatsResponse, RegistrationResponse, StatsResponse};
use async_trait::async_trait;
use seatbook_core::{EventId, Interface, SeatbookResult};

/// Admin service trait.
#[async_trait]
pub trait AdminService: Interface + Send + Sync {
    /// System-wide event and registration totals.
    async fn stats(&self) -> SeatbookResult<StatsResponse>;

    /// All registrations for an event, newest first.
    async fn event_registrations(
        &self,
        event_id: EventId,
    ) -> SeatbookResult<Vec<RegistrationResponse>>;

    /// Per-event capacity and registration counts.
    async fn registration_stats(&self) -> SeatbookResult<Vec<EventRegistrationStatsResponse>>;
}
