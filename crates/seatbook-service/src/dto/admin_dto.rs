//! Admin read-model DTOs.

use seatbook_core::EventId;
use serde::{Deserialize, Serialize};

/// Registration counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsResponse {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
}

/// System-wide aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_events: u64,
    pub total_capacity: i64,
    pub total_available_spots: i64,
    pub total_registrations: u64,
    pub registrations_by_status: StatusCountsResponse,
}

/// Capacity and registration counts for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationStatsResponse {
    pub event_id: EventId,
    pub title: String,
    pub capacity: i32,
    pub available_spots: i32,
    pub registrations: StatusCountsResponse,
}
