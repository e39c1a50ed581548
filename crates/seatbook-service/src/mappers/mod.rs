//! Entity-DTO mappers.
//!
//! Single-entity conversions live next to their DTOs; this module holds the
//! ones that combine repository read models.

use crate::dto::{
    EventRegistrationStatsResponse, EventResponse, RegistrationResponse,
    RegistrationWithEventResponse, StatsResponse, StatusCountsResponse,
};
use seatbook_repository::{EventRegistrationStats, EventTotals, RegistrationWithEvent, StatusCounts};

impl From<StatusCounts> for StatusCountsResponse {
    fn from(counts: StatusCounts) -> Self {
        Self {
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

impl From<RegistrationWithEvent> for RegistrationWithEventResponse {
    fn from(row: RegistrationWithEvent) -> Self {
        Self {
            registration: RegistrationResponse::from(row.registration),
            event: EventResponse::from(row.event),
        }
    }
}

impl From<EventRegistrationStats> for EventRegistrationStatsResponse {
    fn from(stats: EventRegistrationStats) -> Self {
        Self {
            event_id: stats.event_id,
            title: stats.title,
            capacity: stats.capacity,
            available_spots: stats.available_spots,
            registrations: stats.counts.into(),
        }
    }
}

/// Builds the admin stats view from the two store aggregates.
#[must_use]
pub fn stats_response(totals: EventTotals, counts: StatusCounts) -> StatsResponse {
    StatsResponse {
        total_events: totals.events,
        total_capacity: totals.capacity,
        total_available_spots: totals.available_spots,
        total_registrations: counts.total(),
        registrations_by_status: counts.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_totals() {
        let totals = EventTotals {
            events: 2,
            capacity: 30,
            available_spots: 27,
        };
        let counts = StatusCounts {
            pending: 4,
            approved: 3,
            rejected: 1,
        };

        let stats = stats_response(totals, counts);
        assert_eq!(stats.total_registrations, 8);
        assert_eq!(stats.registrations_by_status.approved, 3);
        assert_eq!(stats.total_available_spots, 27);
    }
}
