//! Event service implementation.

use crate::cache::{cache_keys, CacheCoordinatorInterface, CoordinatorExt};
use crate::dto::{CreateEventRequest, EventResponse, UpdateEventRequest};
use crate::event_service::EventService;
use crate::ledger::CapacityLedgerInterface;
use async_trait::async_trait;
use chrono::Utc;
use seatbook_core::{Event, EventId, SeatbookError, SeatbookResult, UserId, ValidateExt};
use seatbook_repository::EventRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Event service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = EventService)]
pub struct EventServiceComponent {
    #[shaku(inject)]
    events: Arc<dyn EventRepository>,
    #[shaku(inject)]
    ledger: Arc<dyn CapacityLedgerInterface>,
    #[shaku(inject)]
    coordinator: Arc<dyn CacheCoordinatorInterface>,
}

impl EventServiceComponent {
    /// Creates a new event service.
    pub fn new(
        events: Arc<dyn EventRepository>,
        ledger: Arc<dyn CapacityLedgerInterface>,
        coordinator: Arc<dyn CacheCoordinatorInterface>,
    ) -> Self {
        Self {
            events,
            ledger,
            coordinator,
        }
    }

    async fn load(&self, id: EventId) -> SeatbookResult<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| SeatbookError::not_found("Event", id))
    }
}

#[async_trait]
impl EventService for EventServiceComponent {
    async fn create_event(
        &self,
        created_by: UserId,
        request: CreateEventRequest,
    ) -> SeatbookResult<EventResponse> {
        debug!("Creating event: {}", request.title);

        request.validate_request()?;

        let event = Event::new(
            request.title,
            request.description,
            request.venue,
            request.starts_at,
            request.capacity,
            created_by,
        )?;

        let saved = self.events.save(&event).await?;

        self.coordinator
            .invalidate(&[cache_keys::events_list()])
            .await;

        info!("Event created: {} (capacity {})", saved.id, saved.capacity);
        Ok(EventResponse::from(saved))
    }

    async fn get_event(&self, id: EventId) -> SeatbookResult<EventResponse> {
        debug!("Getting event: {}", id);

        let event: Event = self
            .coordinator
            .read_through(&cache_keys::event_by_id(id), || self.load(id))
            .await?;

        Ok(EventResponse::from(event))
    }

    async fn list_events(&self) -> SeatbookResult<Vec<EventResponse>> {
        debug!("Listing events");

        let events: Vec<Event> = self
            .coordinator
            .read_through(&cache_keys::events_list(), || self.events.find_all())
            .await?;

        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    async fn update_event(
        &self,
        id: EventId,
        request: UpdateEventRequest,
    ) -> SeatbookResult<EventResponse> {
        debug!("Updating event: {}", id);

        request.validate_request()?;

        let mut event = self.load(id).await?;

        // Capacity first: a rejected resize leaves the event untouched
        if let Some(capacity) = request.capacity.filter(|c| *c != event.capacity) {
            let resized = self.ledger.resize(id, capacity).await?;
            event.capacity = resized.capacity;
            event.available_spots = resized.available_spots;
        }

        if request.touches_details() {
            if let Some(title) = request.title {
                event.title = title;
            }
            if let Some(description) = request.description {
                event.description = Some(description);
            }
            if let Some(venue) = request.venue {
                event.venue = Some(venue);
            }
            if let Some(starts_at) = request.starts_at {
                event.starts_at = starts_at;
            }
            event.updated_at = Utc::now();
            event = self.events.update_details(&event).await?;
        }

        self.coordinator
            .invalidate(&cache_keys::event_keys(id))
            .await;

        info!("Event updated: {}", id);
        Ok(EventResponse::from(event))
    }

    async fn delete_event(&self, id: EventId) -> SeatbookResult<()> {
        debug!("Deleting event: {}", id);

        let removed = self.events.delete_cascade(id).await?;

        self.coordinator
            .invalidate(&cache_keys::event_keys(id))
            .await;

        info!("Event deleted: {} ({} registrations removed)", id, removed);
        Ok(())
    }
}

impl std::fmt::Debug for EventServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventServiceComponent").finish_non_exhaustive()
    }
}
