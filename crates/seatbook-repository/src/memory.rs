//! In-memory store for tests and single-process demos.
//!
//! One async mutex guards the whole state. A transaction holds the lock from
//! `begin` until it commits or is dropped and works on a staged copy, so
//! concurrent transactions are fully serialized and a rollback is just
//! discarding the copy.

use crate::{
    EventRegistrationStats, EventRepository, EventTotals, RegistrationRepository,
    RegistrationWithEvent, StatusCounts, StoreTransaction, UnitOfWork,
};
use async_trait::async_trait;
use seatbook_core::{
    Event, EventId, Registration, RegistrationId, RegistrationStatus, SeatbookError,
    SeatbookResult, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
struct State {
    events: HashMap<EventId, Event>,
    registrations: HashMap<RegistrationId, Registration>,
}

/// In-memory implementation of every store trait.
///
/// Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreUnavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    async fn lock(&self) -> SeatbookResult<tokio::sync::MutexGuard<'_, State>> {
        self.check_available()?;
        Ok(self.state.lock().await)
    }

    fn check_available(&self) -> SeatbookResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(SeatbookError::StoreUnavailable(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn newest_first(a: &Registration, b: &Registration) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

fn by_start(a: &Event, b: &Event) -> std::cmp::Ordering {
    a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn find_by_id(&self, id: EventId) -> SeatbookResult<Option<Event>> {
        Ok(self.lock().await?.events.get(&id).cloned())
    }

    async fn find_all(&self) -> SeatbookResult<Vec<Event>> {
        let mut events: Vec<Event> = self.lock().await?.events.values().cloned().collect();
        events.sort_by(by_start);
        Ok(events)
    }

    async fn save(&self, event: &Event) -> SeatbookResult<Event> {
        let mut state = self.lock().await?;
        if state.events.contains_key(&event.id) {
            return Err(SeatbookError::Conflict(format!("event {} exists", event.id)));
        }
        state.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn update_details(&self, event: &Event) -> SeatbookResult<Event> {
        let mut state = self.lock().await?;
        let stored = state
            .events
            .get_mut(&event.id)
            .ok_or_else(|| SeatbookError::not_found("Event", event.id))?;
        stored.title = event.title.clone();
        stored.description = event.description.clone();
        stored.venue = event.venue.clone();
        stored.starts_at = event.starts_at;
        stored.updated_at = event.updated_at;
        Ok(stored.clone())
    }

    async fn resize_capacity(&self, id: EventId, new_capacity: i32) -> SeatbookResult<Event> {
        let mut state = self.lock().await?;
        let stored = state
            .events
            .get_mut(&id)
            .ok_or_else(|| SeatbookError::not_found("Event", id))?;
        stored.resize(new_capacity)?;
        Ok(stored.clone())
    }

    async fn delete_cascade(&self, id: EventId) -> SeatbookResult<u64> {
        let mut state = self.lock().await?;
        if state.events.remove(&id).is_none() {
            return Err(SeatbookError::not_found("Event", id));
        }
        let before = state.registrations.len();
        state.registrations.retain(|_, r| r.event_id != id);
        Ok((before - state.registrations.len()) as u64)
    }

    async fn totals(&self) -> SeatbookResult<EventTotals> {
        let state = self.lock().await?;
        Ok(state
            .events
            .values()
            .fold(EventTotals::default(), |mut totals, event| {
                totals.events += 1;
                totals.capacity += i64::from(event.capacity);
                totals.available_spots += i64::from(event.available_spots);
                totals
            }))
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn find_by_id(&self, id: RegistrationId) -> SeatbookResult<Option<Registration>> {
        Ok(self.lock().await?.registrations.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> SeatbookResult<Vec<RegistrationWithEvent>> {
        let state = self.lock().await?;
        let mut registrations: Vec<&Registration> = state
            .registrations
            .values()
            .filter(|r| r.user_id == user_id)
            .collect();
        registrations.sort_by(|a, b| newest_first(a, b));

        Ok(registrations
            .into_iter()
            .filter_map(|r| {
                state.events.get(&r.event_id).map(|e| RegistrationWithEvent {
                    registration: r.clone(),
                    event: e.clone(),
                })
            })
            .collect())
    }

    async fn find_by_event(&self, event_id: EventId) -> SeatbookResult<Vec<Registration>> {
        let state = self.lock().await?;
        let mut registrations: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        registrations.sort_by(newest_first);
        Ok(registrations)
    }

    async fn exists_for(&self, user_id: UserId, event_id: EventId) -> SeatbookResult<bool> {
        Ok(self
            .lock()
            .await?
            .registrations
            .values()
            .any(|r| r.user_id == user_id && r.event_id == event_id))
    }

    async fn save(&self, registration: &Registration) -> SeatbookResult<Registration> {
        let mut state = self.lock().await?;
        if !state.events.contains_key(&registration.event_id) {
            return Err(SeatbookError::not_found("Event", registration.event_id));
        }
        // Mirrors UNIQUE (user_id, event_id)
        if state
            .registrations
            .values()
            .any(|r| r.user_id == registration.user_id && r.event_id == registration.event_id)
        {
            return Err(SeatbookError::DuplicateRegistration(format!(
                "user {} is already registered for event {}",
                registration.user_id, registration.event_id
            )));
        }
        state
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration.clone())
    }

    async fn delete_pending(&self, id: RegistrationId) -> SeatbookResult<bool> {
        let mut state = self.lock().await?;
        match state.registrations.get(&id) {
            Some(r) if r.is_pending() => {
                state.registrations.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_by_status(&self) -> SeatbookResult<StatusCounts> {
        let state = self.lock().await?;
        let mut counts = StatusCounts::default();
        for registration in state.registrations.values() {
            counts.record(registration.status);
        }
        Ok(counts)
    }

    async fn event_stats(&self) -> SeatbookResult<Vec<EventRegistrationStats>> {
        let state = self.lock().await?;
        let mut events: Vec<&Event> = state.events.values().collect();
        events.sort_by(|a, b| by_start(a, b));

        Ok(events
            .into_iter()
            .map(|event| {
                let mut counts = StatusCounts::default();
                for r in state.registrations.values().filter(|r| r.event_id == event.id) {
                    counts.record(r.status);
                }
                EventRegistrationStats {
                    event_id: event.id,
                    title: event.title.clone(),
                    capacity: event.capacity,
                    available_spots: event.available_spots,
                    counts,
                }
            })
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn begin(&self) -> SeatbookResult<Box<dyn StoreTransaction>> {
        self.check_available()?;
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            unavailable: Arc::clone(&self.unavailable),
        }))
    }
}

/// A serialized transaction over [`InMemoryStore`].
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<State>,
    staged: State,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTransaction {
    fn check_available(&self) -> SeatbookResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(SeatbookError::StoreUnavailable(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn lock_registration(
        &mut self,
        id: RegistrationId,
    ) -> SeatbookResult<Option<Registration>> {
        self.check_available()?;
        Ok(self.staged.registrations.get(&id).cloned())
    }

    async fn event_exists(&mut self, event_id: EventId) -> SeatbookResult<bool> {
        self.check_available()?;
        Ok(self.staged.events.contains_key(&event_id))
    }

    async fn decrement_available_spots(&mut self, event_id: EventId) -> SeatbookResult<Option<i32>> {
        self.check_available()?;
        Ok(self
            .staged
            .events
            .get_mut(&event_id)
            .and_then(|event| event.apply_spot_delta(-1).ok()))
    }

    async fn increment_available_spots(
        &mut self,
        event_id: EventId,
        amount: i32,
    ) -> SeatbookResult<Option<i32>> {
        self.check_available()?;
        Ok(self
            .staged
            .events
            .get_mut(&event_id)
            .and_then(|event| event.apply_spot_delta(amount).ok()))
    }

    async fn update_registration_status(
        &mut self,
        registration: &Registration,
    ) -> SeatbookResult<bool> {
        self.check_available()?;
        match self.staged.registrations.get_mut(&registration.id) {
            Some(stored) if stored.status == RegistrationStatus::Pending => {
                stored.status = registration.status;
                stored.approved_by = registration.approved_by;
                stored.reason = registration.reason.clone();
                stored.updated_at = registration.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(self: Box<Self>) -> SeatbookResult<()> {
        self.check_available()?;
        let Self {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> SeatbookResult<()> {
        Ok(())
    }
}
