//! Event service trait definition.

use crate::dto::{CreateEventRequest, EventResponse, UpdateEventRequest};
use async_trait::async_trait;
use seatbook_core::{EventId, Interface, SeatbookResult, UserId};

/// Event service trait.
#[async_trait]
pub trait EventService: Interface + Send + Sync {
    /// Creates an event with every seat available.
    async fn create_event(
        &self,
        created_by: UserId,
        request: CreateEventRequest,
    ) -> SeatbookResult<EventResponse>;

    /// Gets an event, served from the cache when possible.
    async fn get_event(&self, id: EventId) -> SeatbookResult<EventResponse>;

    /// Lists every event ordered by start time, served from the cache when possible.
    async fn list_events(&self) -> SeatbookResult<Vec<EventResponse>>;

    /// Updates an event's details and, optionally, its capacity.
    async fn update_event(
        &self,
        id: EventId,
        request: UpdateEventRequest,
    ) -> SeatbookResult<EventResponse>;

    /// Deletes an event together with all of its registrations.
    async fn delete_event(&self, id: EventId) -> SeatbookResult<()>;
}
