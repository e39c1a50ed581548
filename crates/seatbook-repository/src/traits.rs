//! Repository trait definitions.
//!
//! The durable store is the single source of truth for events and
//! registrations. Everything that moves `available_spots` or decides a
//! registration goes through a [`StoreTransaction`] so that the two writes
//! commit or roll back together.

use async_trait::async_trait;
use seatbook_core::{
    Event, EventId, Interface, Registration, RegistrationId, RegistrationStatus, SeatbookResult,
    UserId,
};
use serde::{Deserialize, Serialize};

/// Event repository trait.
#[async_trait]
pub trait EventRepository: Interface + Send + Sync {
    /// Finds an event by ID.
    async fn find_by_id(&self, id: EventId) -> SeatbookResult<Option<Event>>;

    /// Lists every event ordered by start time.
    async fn find_all(&self) -> SeatbookResult<Vec<Event>>;

    /// Saves a new event.
    async fn save(&self, event: &Event) -> SeatbookResult<Event>;

    /// Writes the descriptive fields of an event.
    ///
    /// Capacity and spot counts are left untouched. Returns `NotFound` when
    /// the event no longer exists.
    async fn update_details(&self, event: &Event) -> SeatbookResult<Event>;

    /// Changes the declared capacity under a row lock, shifting
    /// `available_spots` by the same difference.
    ///
    /// Fails with `BusinessRule` if fewer seats would remain than are
    /// already approved.
    async fn resize_capacity(&self, id: EventId, new_capacity: i32) -> SeatbookResult<Event>;

    /// Deletes an event and all of its registrations in one transaction.
    ///
    /// Returns the number of registrations removed.
    async fn delete_cascade(&self, id: EventId) -> SeatbookResult<u64>;

    /// Aggregates over every event.
    async fn totals(&self) -> SeatbookResult<EventTotals>;
}

/// Registration repository trait.
#[async_trait]
pub trait RegistrationRepository: Interface + Send + Sync {
    /// Finds a registration by ID.
    async fn find_by_id(&self, id: RegistrationId) -> SeatbookResult<Option<Registration>>;

    /// Lists a user's registrations with their events, newest first.
    async fn find_by_user(&self, user_id: UserId) -> SeatbookResult<Vec<RegistrationWithEvent>>;

    /// Lists an event's registrations, newest first.
    async fn find_by_event(&self, event_id: EventId) -> SeatbookResult<Vec<Registration>>;

    /// Checks if the user already has a registration for the event, in any state.
    async fn exists_for(&self, user_id: UserId, event_id: EventId) -> SeatbookResult<bool>;

    /// Saves a new registration.
    ///
    /// A second registration for the same (user, event) pair fails with
    /// `DuplicateRegistration`; a vanished event fails with `NotFound`.
    async fn save(&self, registration: &Registration) -> SeatbookResult<Registration>;

    /// Deletes a registration only if it is still pending.
    ///
    /// Returns `false` when no pending row matched.
    async fn delete_pending(&self, id: RegistrationId) -> SeatbookResult<bool>;

    /// Counts registrations per status.
    async fn count_by_status(&self) -> SeatbookResult<StatusCounts>;

    /// Per-event capacity and registration counts, ordered by start time.
    async fn event_stats(&self) -> SeatbookResult<Vec<EventRegistrationStats>>;
}

/// Opens store transactions.
#[async_trait]
pub trait UnitOfWork: Interface + Send + Sync {
    /// Begins a new transaction.
    async fn begin(&self) -> SeatbookResult<Box<dyn StoreTransaction>>;
}

/// Operations available inside a single store transaction.
///
/// Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Reads a registration and locks it until the transaction ends.
    async fn lock_registration(
        &mut self,
        id: RegistrationId,
    ) -> SeatbookResult<Option<Registration>>;

    /// Checks if the event exists.
    async fn event_exists(&mut self, event_id: EventId) -> SeatbookResult<bool>;

    /// Takes one seat if any is left.
    ///
    /// Returns the new `available_spots`, or `None` when no row matched
    /// (event missing or already full).
    async fn decrement_available_spots(&mut self, event_id: EventId) -> SeatbookResult<Option<i32>>;

    /// Returns `amount` seats if that keeps `available_spots <= capacity`.
    ///
    /// Returns the new `available_spots`, or `None` when no row matched.
    async fn increment_available_spots(
        &mut self,
        event_id: EventId,
        amount: i32,
    ) -> SeatbookResult<Option<i32>>;

    /// Writes the status, approver, and reason of a registration, only if
    /// the stored row is still pending.
    ///
    /// Returns `false` when the stored row was no longer pending.
    async fn update_registration_status(&mut self, registration: &Registration)
        -> SeatbookResult<bool>;

    /// Commits the transaction.
    async fn commit(self: Box<Self>) -> SeatbookResult<()>;

    /// Rolls the transaction back.
    async fn rollback(self: Box<Self>) -> SeatbookResult<()>;
}

/// A registration joined with its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWithEvent {
    /// The registration.
    pub registration: Registration,
    /// The event it targets.
    pub event: Event,
}

/// Registration counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Awaiting a decision.
    pub pending: u64,
    /// Seat granted.
    pub approved: u64,
    /// Declined.
    pub rejected: u64,
}

impl StatusCounts {
    /// Adds one registration in `status`.
    pub fn record(&mut self, status: RegistrationStatus) {
        match status {
            RegistrationStatus::Pending => self.pending += 1,
            RegistrationStatus::Approved => self.approved += 1,
            RegistrationStatus::Rejected => self.rejected += 1,
        }
    }

    /// Total across all statuses.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected
    }
}

/// Aggregates over all events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotals {
    /// Number of events.
    pub events: u64,
    /// Sum of declared capacities.
    pub capacity: i64,
    /// Sum of available spots.
    pub available_spots: i64,
}

/// Capacity and registration counts for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistrationStats {
    /// Event ID.
    pub event_id: EventId,
    /// Event title.
    pub title: String,
    /// Declared capacity.
    pub capacity: i32,
    /// Seats left.
    pub available_spots: i32,
    /// Registrations per status.
    pub counts: StatusCounts,
}
