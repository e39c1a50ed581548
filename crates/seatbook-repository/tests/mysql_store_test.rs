//! Integration tests for the MySQL store.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use chrono::{Duration, Utc};
use common::TestDatabase;
use seatbook_core::{Event, Registration, RegistrationStatus, SeatbookError, UserId};
use seatbook_repository::{
    EventRepository, MySqlEventRepository, MySqlRegistrationRepository, MySqlUnitOfWork,
    RegistrationRepository, UnitOfWork,
};

fn create_test_event(title: &str, capacity: i32) -> Event {
    Event::new(
        title.to_string(),
        Some("Integration test event".to_string()),
        Some("Room 1".to_string()),
        Utc::now() + Duration::days(3),
        capacity,
        UserId::new(),
    )
    .expect("valid event")
}

#[tokio::test]
async fn test_save_and_find_event() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());

    let event = create_test_event("RustConf", 10);
    let saved = events.save(&event).await.expect("Failed to save event");
    assert_eq!(saved.id, event.id);
    assert_eq!(saved.capacity, 10);
    assert_eq!(saved.available_spots, 10);

    let found = events
        .find_by_id(event.id)
        .await
        .expect("Query failed")
        .expect("Event not found");
    assert_eq!(found.title, "RustConf");
    assert_eq!(found.venue.as_deref(), Some("Room 1"));
}

#[tokio::test]
async fn test_duplicate_registration_maps_to_domain_error() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let registrations = MySqlRegistrationRepository::new(db.pool());

    let event = events.save(&create_test_event("Dup", 5)).await.unwrap();
    let user = UserId::new();

    registrations
        .save(&Registration::new(user, event.id))
        .await
        .expect("first registration");

    match registrations
        .save(&Registration::new(user, event.id))
        .await
        .unwrap_err()
    {
        SeatbookError::DuplicateRegistration(_) => {}
        other => panic!("Expected DuplicateRegistration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_registration_for_missing_event_is_not_found() {
    let db = TestDatabase::new().await;
    let registrations = MySqlRegistrationRepository::new(db.pool());

    let event = create_test_event("Never saved", 1);
    let result = registrations
        .save(&Registration::new(UserId::new(), event.id))
        .await;

    assert!(matches!(result, Err(SeatbookError::NotFound { .. })));
}

#[tokio::test]
async fn test_conditional_decrement_stops_at_zero() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let uow = MySqlUnitOfWork::new(db.pool());

    let event = events.save(&create_test_event("Tiny", 1)).await.unwrap();

    let mut tx = uow.begin().await.unwrap();
    assert_eq!(tx.decrement_available_spots(event.id).await.unwrap(), Some(0));
    assert_eq!(tx.decrement_available_spots(event.id).await.unwrap(), None);
    tx.commit().await.unwrap();

    let stored = events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.available_spots, 0);
}

#[tokio::test]
async fn test_increment_never_exceeds_capacity() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let uow = MySqlUnitOfWork::new(db.pool());

    let event = events.save(&create_test_event("Full house", 2)).await.unwrap();

    let mut tx = uow.begin().await.unwrap();
    assert_eq!(tx.increment_available_spots(event.id, 1).await.unwrap(), None);
    assert_eq!(tx.decrement_available_spots(event.id).await.unwrap(), Some(1));
    assert_eq!(tx.increment_available_spots(event.id, 1).await.unwrap(), Some(2));
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn test_rollback_restores_spots() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let uow = MySqlUnitOfWork::new(db.pool());

    let event = events.save(&create_test_event("Rollback", 3)).await.unwrap();

    let mut tx = uow.begin().await.unwrap();
    tx.decrement_available_spots(event.id).await.unwrap();
    tx.rollback().await.unwrap();

    let stored = events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.available_spots, 3);
}

#[tokio::test]
async fn test_concurrent_decrements_never_oversell() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let event = events.save(&create_test_event("Race", 3)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let uow = MySqlUnitOfWork::new(db.pool());
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            let mut tx = uow.begin().await.unwrap();
            let taken = tx.decrement_available_spots(event_id).await.unwrap();
            tx.commit().await.unwrap();
            taken.is_some()
        }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            granted += 1;
        }
    }

    assert_eq!(granted, 3);
    let stored = events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.available_spots, 0);
}

#[tokio::test]
async fn test_status_update_only_applies_to_pending() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let registrations = MySqlRegistrationRepository::new(db.pool());
    let uow = MySqlUnitOfWork::new(db.pool());

    let event = events.save(&create_test_event("Decide", 2)).await.unwrap();
    let mut registration = registrations
        .save(&Registration::new(UserId::new(), event.id))
        .await
        .unwrap();

    let admin = UserId::new();
    registration.approve(admin, Some("welcome".to_string())).unwrap();

    let mut tx = uow.begin().await.unwrap();
    let locked = tx.lock_registration(registration.id).await.unwrap().unwrap();
    assert!(locked.is_pending());
    assert!(tx.update_registration_status(&registration).await.unwrap());
    assert!(!tx.update_registration_status(&registration).await.unwrap());
    tx.commit().await.unwrap();

    let stored = registrations
        .find_by_id(registration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RegistrationStatus::Approved);
    assert_eq!(stored.approved_by, Some(admin));
    assert_eq!(stored.reason.as_deref(), Some("welcome"));

    // Decided registrations are no longer deletable
    assert!(!registrations.delete_pending(registration.id).await.unwrap());
}

#[tokio::test]
async fn test_resize_capacity_keeps_approved_seats() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let uow = MySqlUnitOfWork::new(db.pool());

    let event = events.save(&create_test_event("Resize", 3)).await.unwrap();
    let mut tx = uow.begin().await.unwrap();
    tx.decrement_available_spots(event.id).await.unwrap();
    tx.decrement_available_spots(event.id).await.unwrap();
    tx.commit().await.unwrap();

    let grown = events.resize_capacity(event.id, 5).await.unwrap();
    assert_eq!(grown.capacity, 5);
    assert_eq!(grown.available_spots, 3);

    match events.resize_capacity(event.id, 1).await.unwrap_err() {
        SeatbookError::BusinessRule(_) => {}
        other => panic!("Expected BusinessRule, got {other:?}"),
    }

    let stored = events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.capacity, 5);
}

#[tokio::test]
async fn test_delete_cascade_and_stats() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let registrations = MySqlRegistrationRepository::new(db.pool());

    let kept = events.save(&create_test_event("Kept", 4)).await.unwrap();
    let dropped = events.save(&create_test_event("Dropped", 4)).await.unwrap();

    registrations
        .save(&Registration::new(UserId::new(), kept.id))
        .await
        .unwrap();
    for _ in 0..2 {
        registrations
            .save(&Registration::new(UserId::new(), dropped.id))
            .await
            .unwrap();
    }

    assert_eq!(registrations.count_by_status().await.unwrap().pending, 3);

    assert_eq!(events.delete_cascade(dropped.id).await.unwrap(), 2);
    assert!(events.find_by_id(dropped.id).await.unwrap().is_none());

    let counts = registrations.count_by_status().await.unwrap();
    assert_eq!(counts.total(), 1);

    let stats = registrations.event_stats().await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].event_id, kept.id);
    assert_eq!(stats[0].counts.pending, 1);

    let totals = events.totals().await.unwrap();
    assert_eq!(totals.events, 1);
    assert_eq!(totals.capacity, 4);

    assert!(matches!(
        events.delete_cascade(dropped.id).await,
        Err(SeatbookError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_find_by_user_joins_event() {
    let db = TestDatabase::new().await;
    let events = MySqlEventRepository::new(db.pool());
    let registrations = MySqlRegistrationRepository::new(db.pool());

    let user = UserId::new();
    let first = events.save(&create_test_event("First", 2)).await.unwrap();
    let second = events.save(&create_test_event("Second", 2)).await.unwrap();

    registrations
        .save(&Registration::new(user, first.id))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    registrations
        .save(&Registration::new(user, second.id))
        .await
        .unwrap();

    let mine = registrations.find_by_user(user).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].event.title, "Second");
    assert_eq!(mine[1].event.title, "First");
    assert!(registrations.exists_for(user, first.id).await.unwrap());
}
