//! Event DTOs.

use chrono::{DateTime, Utc};
use seatbook_core::rules::{event_description, event_title, positive_capacity};
use seatbook_core::{Event, EventId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(custom(function = "event_title"))]
    pub title: String,

    #[validate(custom(function = "event_description"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Venue cannot exceed 255 characters"))]
    pub venue: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[validate(custom(function = "positive_capacity"))]
    pub capacity: i32,
}

/// Request to update an event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(custom(function = "event_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "event_description"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Venue cannot exceed 255 characters"))]
    pub venue: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    #[validate(custom(function = "positive_capacity"))]
    pub capacity: Option<i32>,
}

impl UpdateEventRequest {
    /// Checks if any descriptive field is set.
    #[must_use]
    pub const fn touches_details(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.venue.is_some()
            || self.starts_at.is_some()
    }
}

/// Event response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub capacity: i32,
    pub available_spots: i32,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            venue: event.venue,
            starts_at: event.starts_at,
            capacity: event.capacity,
            available_spots: event.available_spots,
            created_by: event.created_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
