//! Registration DTOs.

use super::EventResponse;
use chrono::{DateTime, Utc};
use seatbook_core::{EventId, Registration, RegistrationId, RegistrationStatus, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register for an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub event_id: EventId,
}

/// Body of an admin decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    #[validate(length(max = 1000, message = "Reason cannot exceed 1000 characters"))]
    pub reason: Option<String>,
}

/// Registration response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub status: RegistrationStatus,
    pub approved_by: Option<UserId>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            user_id: registration.user_id,
            event_id: registration.event_id,
            status: registration.status,
            approved_by: registration.approved_by,
            reason: registration.reason,
            created_at: registration.created_at,
            updated_at: registration.updated_at,
        }
    }
}

/// A caller's registration with its event inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithEventResponse {
    #[serde(flatten)]
    pub registration: RegistrationResponse,
    pub event: EventResponse,
}
