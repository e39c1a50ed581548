//! Capacity ledger.
//!
//! The only code that moves `available_spots`. Spot changes made inside a
//! registration decision run on the caller's store transaction and are
//! reported back as a [`LedgerReceipt`], which the caller forwards to the
//! cache coordinator once the transaction has committed.

use crate::cache::{cache_keys, CacheCoordinatorInterface};
use async_trait::async_trait;
use seatbook_core::{Event, EventId, Interface, SeatbookError, SeatbookResult};
use seatbook_repository::{EventRepository, StoreTransaction};
use serde::{Deserialize, Serialize};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a committed-to-be spot change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Event whose spots moved.
    pub event_id: EventId,
    /// Signed change applied to `available_spots`.
    pub delta: i32,
    /// `available_spots` after the change.
    pub available_spots: i32,
}

/// Capacity ledger interface.
#[async_trait]
pub trait CapacityLedgerInterface: Interface {
    /// Takes one seat inside `tx`.
    ///
    /// Fails with `CapacityExhausted` when the event is full, or `NotFound`
    /// when it no longer exists. Nothing is written in either case.
    async fn try_decrement(
        &self,
        tx: &mut dyn StoreTransaction,
        event_id: EventId,
    ) -> SeatbookResult<LedgerReceipt>;

    /// Returns `amount` seats inside `tx`.
    ///
    /// Fails with `BusinessRule` if that would exceed the capacity.
    async fn increment(
        &self,
        tx: &mut dyn StoreTransaction,
        event_id: EventId,
        amount: i32,
    ) -> SeatbookResult<LedgerReceipt>;

    /// Changes the declared capacity and carries the difference into the
    /// available spots, in its own transaction.
    ///
    /// Invalidates the event's cached snapshots after committing.
    async fn resize(&self, event_id: EventId, new_capacity: i32) -> SeatbookResult<Event>;
}

/// Capacity ledger backed by the durable store.
#[derive(Component)]
#[shaku(interface = CapacityLedgerInterface)]
pub struct CapacityLedger {
    #[shaku(inject)]
    events: Arc<dyn EventRepository>,
    #[shaku(inject)]
    coordinator: Arc<dyn CacheCoordinatorInterface>,
}

impl CapacityLedger {
    /// Creates a new ledger.
    pub fn new(
        events: Arc<dyn EventRepository>,
        coordinator: Arc<dyn CacheCoordinatorInterface>,
    ) -> Self {
        Self {
            events,
            coordinator,
        }
    }
}

#[async_trait]
impl CapacityLedgerInterface for CapacityLedger {
    async fn try_decrement(
        &self,
        tx: &mut dyn StoreTransaction,
        event_id: EventId,
    ) -> SeatbookResult<LedgerReceipt> {
        debug!("Taking a seat for event {}", event_id);

        match tx.decrement_available_spots(event_id).await? {
            Some(available_spots) => Ok(LedgerReceipt {
                event_id,
                delta: -1,
                available_spots,
            }),
            None if tx.event_exists(event_id).await? => {
                info!("Event {} is full", event_id);
                Err(SeatbookError::capacity_exhausted(event_id))
            }
            None => Err(SeatbookError::not_found("Event", event_id)),
        }
    }

    async fn increment(
        &self,
        tx: &mut dyn StoreTransaction,
        event_id: EventId,
        amount: i32,
    ) -> SeatbookResult<LedgerReceipt> {
        debug!("Returning {} seat(s) to event {}", amount, event_id);

        if amount <= 0 {
            return Err(SeatbookError::validation("amount must be positive"));
        }

        match tx.increment_available_spots(event_id, amount).await? {
            Some(available_spots) => Ok(LedgerReceipt {
                event_id,
                delta: amount,
                available_spots,
            }),
            None if tx.event_exists(event_id).await? => Err(SeatbookError::BusinessRule(format!(
                "returning {} seat(s) would exceed the capacity of event {}",
                amount, event_id
            ))),
            None => Err(SeatbookError::not_found("Event", event_id)),
        }
    }

    async fn resize(&self, event_id: EventId, new_capacity: i32) -> SeatbookResult<Event> {
        debug!("Resizing event {} to {}", event_id, new_capacity);

        let event = self.events.resize_capacity(event_id, new_capacity).await?;

        self.coordinator
            .invalidate(&cache_keys::event_keys(event_id))
            .await;

        info!(
            "Event {} capacity is now {} ({} available)",
            event_id, event.capacity, event.available_spots
        );
        Ok(event)
    }
}

impl std::fmt::Debug for CapacityLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapacityLedger").finish_non_exhaustive()
    }
}
