//! Registration service implementation.

use crate::cache::CacheCoordinatorInterface;
use crate::dto::{CreateRegistrationRequest, RegistrationResponse, RegistrationWithEventResponse};
use crate::ledger::{CapacityLedgerInterface, LedgerReceipt};
use crate::registration_service::RegistrationService;
use async_trait::async_trait;
use seatbook_core::{
    Decision, Registration, RegistrationId, SeatbookError, SeatbookResult, UserId,
};
use seatbook_repository::{EventRepository, RegistrationRepository, StoreTransaction, UnitOfWork};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registration service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = RegistrationService)]
pub struct RegistrationServiceComponent {
    #[shaku(inject)]
    events: Arc<dyn EventRepository>,
    #[shaku(inject)]
    registrations: Arc<dyn RegistrationRepository>,
    #[shaku(inject)]
    unit_of_work: Arc<dyn UnitOfWork>,
    #[shaku(inject)]
    ledger: Arc<dyn CapacityLedgerInterface>,
    #[shaku(inject)]
    coordinator: Arc<dyn CacheCoordinatorInterface>,
}

impl RegistrationServiceComponent {
    /// Creates a new registration service.
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        ledger: Arc<dyn CapacityLedgerInterface>,
        coordinator: Arc<dyn CacheCoordinatorInterface>,
    ) -> Self {
        Self {
            events,
            registrations,
            unit_of_work,
            ledger,
            coordinator,
        }
    }

    /// The part of a decision that runs inside the store transaction.
    async fn decide_in(
        &self,
        tx: &mut dyn StoreTransaction,
        id: RegistrationId,
        decision: Decision,
        admin_id: UserId,
        reason: Option<String>,
    ) -> SeatbookResult<(Registration, Option<LedgerReceipt>)> {
        let mut registration = tx
            .lock_registration(id)
            .await?
            .ok_or_else(|| SeatbookError::not_found("Registration", id))?;

        registration.ensure_pending()?;

        let receipt = match decision {
            Decision::Approve => {
                // Seat first, so a full event leaves the registration pending
                let receipt = self
                    .ledger
                    .try_decrement(tx, registration.event_id)
                    .await?;
                registration.approve(admin_id, reason)?;
                Some(receipt)
            }
            Decision::Reject => {
                registration.reject(reason)?;
                None
            }
        };

        if !tx.update_registration_status(&registration).await? {
            return Err(SeatbookError::InvalidTransition(format!(
                "registration {} was decided concurrently",
                id
            )));
        }

        Ok((registration, receipt))
    }
}

#[async_trait]
impl RegistrationService for RegistrationServiceComponent {
    async fn register(
        &self,
        user_id: UserId,
        request: CreateRegistrationRequest,
    ) -> SeatbookResult<RegistrationResponse> {
        let event_id = request.event_id;
        debug!("User {} registering for event {}", user_id, event_id);

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(SeatbookError::not_found("Event", event_id));
        }

        if self.registrations.exists_for(user_id, event_id).await? {
            return Err(SeatbookError::DuplicateRegistration(format!(
                "user {} is already registered for event {}",
                user_id, event_id
            )));
        }

        // The unique index catches a concurrent duplicate that slipped past the check
        let saved = self
            .registrations
            .save(&Registration::new(user_id, event_id))
            .await?;

        info!("Registration created: {} (event {})", saved.id, event_id);
        Ok(RegistrationResponse::from(saved))
    }

    async fn my_registrations(
        &self,
        user_id: UserId,
    ) -> SeatbookResult<Vec<RegistrationWithEventResponse>> {
        debug!("Listing registrations of user {}", user_id);

        let rows = self.registrations.find_by_user(user_id).await?;
        Ok(rows
            .into_iter()
            .map(RegistrationWithEventResponse::from)
            .collect())
    }

    async fn decide(
        &self,
        id: RegistrationId,
        decision: Decision,
        admin_id: UserId,
        reason: Option<String>,
    ) -> SeatbookResult<RegistrationResponse> {
        debug!("Admin {} deciding {} on registration {}", admin_id, decision, id);

        let mut tx = self.unit_of_work.begin().await?;

        let outcome = self
            .decide_in(tx.as_mut(), id, decision, admin_id, reason)
            .await;

        let (registration, receipt) = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of decision on {} failed: {}", id, rollback_err);
                }
                return Err(e);
            }
        };

        tx.commit().await?;

        if let Some(receipt) = receipt {
            self.coordinator
                .patch_event_spots(receipt.event_id, receipt.delta)
                .await;
            info!(
                "Registration {} approved by {} ({} spots left on event {})",
                id, admin_id, receipt.available_spots, receipt.event_id
            );
        } else {
            info!("Registration {} rejected by {}", id, admin_id);
        }

        Ok(RegistrationResponse::from(registration))
    }

    async fn cancel(&self, id: RegistrationId, requester: UserId) -> SeatbookResult<()> {
        debug!("User {} cancelling registration {}", requester, id);

        let registration = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| SeatbookError::not_found("Registration", id))?;

        if !registration.is_owned_by(requester) {
            return Err(SeatbookError::forbidden(
                "Only the owner can cancel a registration",
            ));
        }

        registration.ensure_pending()?;

        if !self.registrations.delete_pending(id).await? {
            // Lost a race with a decision or another cancel
            let current = self
                .registrations
                .find_by_id(id)
                .await?
                .ok_or_else(|| SeatbookError::not_found("Registration", id))?;
            current.ensure_pending()?;
            return Err(SeatbookError::Conflict(format!(
                "registration {} could not be cancelled",
                id
            )));
        }

        info!("Registration cancelled: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for RegistrationServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationServiceComponent")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{
        cache_keys, CacheCoordinator, CacheExt, CacheInterface, CoordinatorExt,
        InMemoryCacheService, DEFAULT_TTL,
    };
    use crate::ledger::CapacityLedger;
    use chrono::Utc;
    use seatbook_core::{Event, EventId, RegistrationStatus};
    use seatbook_repository::InMemoryStore;
    use std::time::Duration;

    /// Memory cache that takes `latency` on every round trip.
    struct SlowCache {
        inner: InMemoryCacheService,
        latency: Duration,
    }

    #[async_trait]
    impl CacheInterface for SlowCache {
        async fn get_raw(&self, key: &str) -> SeatbookResult<Option<String>> {
            tokio::time::sleep(self.latency).await;
            self.inner.get_raw(key).await
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> SeatbookResult<()> {
            tokio::time::sleep(self.latency).await;
            self.inner.set_raw(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> SeatbookResult<bool> {
            tokio::time::sleep(self.latency).await;
            self.inner.delete(key).await
        }

        async fn ping(&self) -> SeatbookResult<()> {
            self.inner.ping().await
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    struct Fixture {
        store: InMemoryStore,
        cache: InMemoryCacheService,
        coordinator: Arc<dyn CacheCoordinatorInterface>,
        service: Arc<RegistrationServiceComponent>,
    }

    fn fixture() -> Fixture {
        let cache = InMemoryCacheService::new();
        fixture_over(cache.clone(), Arc::new(cache))
    }

    fn fixture_with_latency(latency: Duration) -> Fixture {
        let cache = InMemoryCacheService::new();
        let slow = SlowCache {
            inner: cache.clone(),
            latency,
        };
        fixture_over(cache, Arc::new(slow))
    }

    fn fixture_over(cache: InMemoryCacheService, port: Arc<dyn CacheInterface>) -> Fixture {
        let store = InMemoryStore::new();
        let coordinator: Arc<dyn CacheCoordinatorInterface> =
            Arc::new(CacheCoordinator::with_defaults(port));
        let events: Arc<dyn EventRepository> = Arc::new(store.clone());
        let ledger = Arc::new(CapacityLedger::new(events.clone(), coordinator.clone()));
        let service = RegistrationServiceComponent::new(
            events,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            ledger,
            coordinator.clone(),
        );
        Fixture {
            store,
            cache,
            coordinator,
            service: Arc::new(service),
        }
    }

    async fn cache_snapshots(fx: &Fixture, event: &Event) {
        fx.cache
            .set(&cache_keys::event_by_id(event.id), event, DEFAULT_TTL)
            .await
            .unwrap();
        fx.cache
            .set(&cache_keys::events_list(), &vec![event.clone()], DEFAULT_TTL)
            .await
            .unwrap();
    }

    /// Each snapshot of the event is either gone or matches the store.
    async fn assert_snapshots_match_store(fx: &Fixture, event_id: EventId) {
        let stored = stored_event(fx, event_id).await.available_spots;

        let cached: Option<Event> = fx.cache.get(&cache_keys::event_by_id(event_id)).await.unwrap();
        if let Some(cached) = cached {
            assert_eq!(cached.available_spots, stored, "stale event snapshot");
        }

        let list: Option<Vec<Event>> = fx.cache.get(&cache_keys::events_list()).await.unwrap();
        if let Some(entry) = list.iter().flatten().find(|e| e.id == event_id) {
            assert_eq!(entry.available_spots, stored, "stale listing entry");
        }
    }

    async fn seed_event(store: &InMemoryStore, capacity: i32) -> Event {
        let event = Event::new(
            "Workshop".to_string(),
            None,
            None,
            Utc::now(),
            capacity,
            UserId::new(),
        )
        .unwrap();
        EventRepository::save(store, &event).await.unwrap()
    }

    async fn register(fx: &Fixture, user: UserId, event_id: EventId) -> RegistrationResponse {
        fx.service
            .register(user, CreateRegistrationRequest { event_id })
            .await
            .unwrap()
    }

    async fn stored_event(fx: &Fixture, id: EventId) -> Event {
        EventRepository::find_by_id(&fx.store, id)
            .await
            .unwrap()
            .unwrap()
    }

    async fn stored_registration(fx: &Fixture, id: RegistrationId) -> Registration {
        RegistrationRepository::find_by_id(&fx.store, id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_creates_pending() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let user = UserId::new();

        let registration = register(&fx, user, event.id).await;

        assert_eq!(registration.status, RegistrationStatus::Pending);
        assert_eq!(registration.user_id, user);
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 2);
    }

    #[tokio::test]
    async fn test_register_twice_is_duplicate() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let user = UserId::new();
        register(&fx, user, event.id).await;

        let result = fx
            .service
            .register(user, CreateRegistrationRequest { event_id: event.id })
            .await;

        match result.unwrap_err() {
            SeatbookError::DuplicateRegistration(_) => {}
            other => panic!("Expected DuplicateRegistration, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_after_rejection() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let user = UserId::new();
        let registration = register(&fx, user, event.id).await;
        fx.service
            .decide(registration.id, Decision::Reject, UserId::new(), None)
            .await
            .unwrap();

        let result = fx
            .service
            .register(user, CreateRegistrationRequest { event_id: event.id })
            .await;
        assert!(matches!(result, Err(SeatbookError::DuplicateRegistration(_))));
    }

    #[tokio::test]
    async fn test_register_for_missing_event() {
        let fx = fixture();
        let result = fx
            .service
            .register(
                UserId::new(),
                CreateRegistrationRequest {
                    event_id: EventId::new(),
                },
            )
            .await;

        match result.unwrap_err() {
            SeatbookError::NotFound { resource_type, .. } => assert_eq!(resource_type, "Event"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_registrations_yield_one() {
        let fx = fixture();
        let event = seed_event(&fx.store, 5).await;
        let user = UserId::new();

        let a = {
            let service = fx.service.clone();
            tokio::spawn(async move {
                service
                    .register(user, CreateRegistrationRequest { event_id: event.id })
                    .await
            })
        };
        let b = {
            let service = fx.service.clone();
            tokio::spawn(async move {
                service
                    .register(user, CreateRegistrationRequest { event_id: event.id })
                    .await
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(SeatbookError::DuplicateRegistration(_)))));
    }

    #[tokio::test]
    async fn test_approve_takes_a_seat() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let registration = register(&fx, UserId::new(), event.id).await;
        let admin = UserId::new();

        let approved = fx
            .service
            .decide(
                registration.id,
                Decision::Approve,
                admin,
                Some("see you there".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(approved.status, RegistrationStatus::Approved);
        assert_eq!(approved.approved_by, Some(admin));
        assert_eq!(approved.reason.as_deref(), Some("see you there"));
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 1);
    }

    #[tokio::test]
    async fn test_reject_leaves_spots_alone() {
        let fx = fixture();
        let event = seed_event(&fx.store, 1).await;
        let registration = register(&fx, UserId::new(), event.id).await;

        let rejected = fx
            .service
            .decide(
                registration.id,
                Decision::Reject,
                UserId::new(),
                Some("no".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(rejected.status, RegistrationStatus::Rejected);
        assert!(rejected.approved_by.is_none());
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 1);
    }

    #[tokio::test]
    async fn test_decided_registration_is_terminal() {
        let fx = fixture();
        let event = seed_event(&fx.store, 3).await;
        let user = UserId::new();
        let registration = register(&fx, user, event.id).await;
        fx.service
            .decide(registration.id, Decision::Approve, UserId::new(), None)
            .await
            .unwrap();

        for decision in [Decision::Approve, Decision::Reject] {
            match fx
                .service
                .decide(registration.id, decision, UserId::new(), None)
                .await
                .unwrap_err()
            {
                SeatbookError::InvalidTransition(_) => {}
                other => panic!("Expected InvalidTransition, got {other:?}"),
            }
        }

        match fx.service.cancel(registration.id, user).await.unwrap_err() {
            SeatbookError::InvalidTransition(_) => {}
            other => panic!("Expected InvalidTransition, got {other:?}"),
        }

        // Only the first approval took a seat
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 2);
    }

    #[tokio::test]
    async fn test_decide_missing_registration() {
        let fx = fixture();
        match fx
            .service
            .decide(RegistrationId::new(), Decision::Approve, UserId::new(), None)
            .await
            .unwrap_err()
        {
            SeatbookError::NotFound { resource_type, .. } => {
                assert_eq!(resource_type, "Registration");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_capacity_two_scenario() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let admin = UserId::new();

        let a = register(&fx, UserId::new(), event.id).await;
        let b = register(&fx, UserId::new(), event.id).await;
        let c = register(&fx, UserId::new(), event.id).await;

        fx.service
            .decide(a.id, Decision::Approve, admin, None)
            .await
            .unwrap();
        fx.service
            .decide(b.id, Decision::Approve, admin, None)
            .await
            .unwrap();

        match fx
            .service
            .decide(c.id, Decision::Approve, admin, None)
            .await
            .unwrap_err()
        {
            SeatbookError::CapacityExhausted { .. } => {}
            other => panic!("Expected CapacityExhausted, got {other:?}"),
        }

        assert_eq!(stored_event(&fx, event.id).await.available_spots, 0);
        let c = stored_registration(&fx, c.id).await;
        assert!(c.is_pending());
        assert!(c.approved_by.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_approvals_on_last_seat() {
        let fx = fixture();
        let event = seed_event(&fx.store, 1).await;
        let admin = UserId::new();

        let first = register(&fx, UserId::new(), event.id).await;
        let second = register(&fx, UserId::new(), event.id).await;

        let handles: Vec<_> = [first.id, second.id]
            .into_iter()
            .map(|id| {
                let service = fx.service.clone();
                tokio::spawn(async move { service.decide(id, Decision::Approve, admin, None).await })
            })
            .collect();

        let mut approved = Vec::new();
        let mut exhausted = Vec::new();
        for (handle, id) in handles.into_iter().zip([first.id, second.id]) {
            match handle.await.unwrap() {
                Ok(_) => approved.push(id),
                Err(SeatbookError::CapacityExhausted { .. }) => exhausted.push(id),
                Err(other) => panic!("Unexpected error: {other:?}"),
            }
        }

        assert_eq!(approved.len(), 1);
        assert_eq!(exhausted.len(), 1);
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 0);
        assert!(stored_registration(&fx, exhausted[0]).await.is_pending());
        assert_eq!(
            stored_registration(&fx, approved[0]).await.status,
            RegistrationStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_concurrent_decisions_on_same_registration() {
        let fx = fixture();
        let event = seed_event(&fx.store, 5).await;
        let registration = register(&fx, UserId::new(), event.id).await;

        let handles: Vec<_> = [Decision::Approve, Decision::Reject, Decision::Approve]
            .into_iter()
            .map(|decision| {
                let service = fx.service.clone();
                let id = registration.id;
                tokio::spawn(async move { service.decide(id, decision, UserId::new(), None).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(SeatbookError::InvalidTransition(_)) => {}
                Err(other) => panic!("Unexpected error: {other:?}"),
            }
        }
        assert_eq!(winners, 1);

        let stored = stored_registration(&fx, registration.id).await;
        let spots = stored_event(&fx, event.id).await.available_spots;
        match stored.status {
            RegistrationStatus::Approved => assert_eq!(spots, 4),
            RegistrationStatus::Rejected => assert_eq!(spots, 5),
            RegistrationStatus::Pending => panic!("registration left pending"),
        }
    }

    #[tokio::test]
    async fn test_approval_drops_cached_snapshots() {
        let fx = fixture();
        let event = seed_event(&fx.store, 3).await;
        cache_snapshots(&fx, &event).await;

        let registration = register(&fx, UserId::new(), event.id).await;
        fx.service
            .decide(registration.id, Decision::Approve, UserId::new(), None)
            .await
            .unwrap();

        assert!(fx
            .cache
            .get_raw(&cache_keys::event_by_id(event.id))
            .await
            .unwrap()
            .is_none());
        assert!(fx.cache.get_raw(&cache_keys::events_list()).await.unwrap().is_none());

        let store = fx.store.clone();
        let id = event.id;
        let reread: Event = fx
            .coordinator
            .read_through(&cache_keys::event_by_id(id), || async move {
                EventRepository::find_by_id(&store, id)
                    .await?
                    .ok_or_else(|| SeatbookError::not_found("Event", id))
            })
            .await
            .unwrap();
        assert_eq!(reread.available_spots, 2);
    }

    #[tokio::test]
    async fn test_rejection_keeps_cached_snapshots() {
        let fx = fixture();
        let event = seed_event(&fx.store, 3).await;
        cache_snapshots(&fx, &event).await;

        let registration = register(&fx, UserId::new(), event.id).await;
        fx.service
            .decide(registration.id, Decision::Reject, UserId::new(), None)
            .await
            .unwrap();

        let cached: Event = fx
            .cache
            .get(&cache_keys::event_by_id(event.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.available_spots, 3);
    }

    #[tokio::test]
    async fn test_concurrent_approvals_keep_cache_consistent() {
        let fx = fixture_with_latency(Duration::from_millis(20));
        let event = seed_event(&fx.store, 3).await;
        cache_snapshots(&fx, &event).await;
        let admin = UserId::new();

        let mut pending = Vec::new();
        for _ in 0..3 {
            pending.push(register(&fx, UserId::new(), event.id).await.id);
        }

        let handles: Vec<_> = pending
            .into_iter()
            .map(|id| {
                let service = fx.service.clone();
                tokio::spawn(async move { service.decide(id, Decision::Approve, admin, None).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(stored_event(&fx, event.id).await.available_spots, 0);
        assert_snapshots_match_store(&fx, event.id).await;
    }

    #[tokio::test]
    async fn test_approval_succeeds_during_cache_outage() {
        let fx = fixture();
        let event = seed_event(&fx.store, 1).await;
        let registration = register(&fx, UserId::new(), event.id).await;
        fx.cache.set_offline(true);

        let approved = fx
            .service
            .decide(registration.id, Decision::Approve, UserId::new(), None)
            .await
            .unwrap();

        assert_eq!(approved.status, RegistrationStatus::Approved);
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 0);
    }

    #[tokio::test]
    async fn test_store_outage_fails_decision_without_side_effects() {
        let fx = fixture();
        let event = seed_event(&fx.store, 1).await;
        let registration = register(&fx, UserId::new(), event.id).await;
        fx.store.set_unavailable(true);

        match fx
            .service
            .decide(registration.id, Decision::Approve, UserId::new(), None)
            .await
            .unwrap_err()
        {
            SeatbookError::StoreUnavailable(_) => {}
            other => panic!("Expected StoreUnavailable, got {other:?}"),
        }

        fx.store.set_unavailable(false);
        assert!(stored_registration(&fx, registration.id).await.is_pending());
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 1);
    }

    #[tokio::test]
    async fn test_cancel_pending_registration() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let user = UserId::new();
        let registration = register(&fx, user, event.id).await;

        fx.service.cancel(registration.id, user).await.unwrap();

        assert!(RegistrationRepository::find_by_id(&fx.store, registration.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(stored_event(&fx, event.id).await.available_spots, 2);

        // A cancelled registration frees the pair for a new one
        register(&fx, user, event.id).await;
    }

    #[tokio::test]
    async fn test_cancel_by_someone_else_is_forbidden() {
        let fx = fixture();
        let event = seed_event(&fx.store, 2).await;
        let registration = register(&fx, UserId::new(), event.id).await;

        match fx
            .service
            .cancel(registration.id, UserId::new())
            .await
            .unwrap_err()
        {
            SeatbookError::Forbidden(_) => {}
            other => panic!("Expected Forbidden, got {other:?}"),
        }
        assert!(stored_registration(&fx, registration.id).await.is_pending());
    }

    #[tokio::test]
    async fn test_cancel_missing_registration() {
        let fx = fixture();
        let result = fx.service.cancel(RegistrationId::new(), UserId::new()).await;
        assert!(matches!(result, Err(SeatbookError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_my_registrations_inline_events() {
        let fx = fixture();
        let user = UserId::new();
        let first = seed_event(&fx.store, 2).await;
        let second = seed_event(&fx.store, 2).await;
        register(&fx, user, first.id).await;
        register(&fx, UserId::new(), first.id).await;
        register(&fx, user, second.id).await;

        let mine = fx.service.my_registrations(user).await.unwrap();

        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.registration.user_id == user));
        assert!(mine
            .iter()
            .all(|r| r.event.id == r.registration.event_id));
    }
}
