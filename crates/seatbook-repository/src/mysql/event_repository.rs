//! MySQL event repository implementation.

use super::rows::{EventRow, EVENT_COLUMNS};
use crate::{traits::EventRepository, DatabasePoolInterface, EventTotals};
use async_trait::async_trait;
use seatbook_core::{Event, EventId, SeatbookError, SeatbookResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL event repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = EventRepository)]
pub struct MySqlEventRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlEventRepository {
    /// Creates a new MySQL event repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TotalsRow {
    events: i64,
    capacity: i64,
    available_spots: i64,
}

#[async_trait]
impl EventRepository for MySqlEventRepository {
    async fn find_by_id(&self, id: EventId) -> SeatbookResult<Option<Event>> {
        debug!("Finding event by id: {}", id);

        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Event::try_from).transpose()
    }

    async fn find_all(&self) -> SeatbookResult<Vec<Event>> {
        debug!("Listing all events");

        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY starts_at ASC, id ASC");
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn save(&self, event: &Event) -> SeatbookResult<Event> {
        debug!("Saving new event: {}", event.title);

        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, venue, starts_at, capacity,
                                available_spots, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(event.starts_at)
        .bind(event.capacity)
        .bind(event.available_spots)
        .bind(event.created_by.to_string())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(self.pool.inner())
        .await?;

        // MySQL doesn't support RETURNING, so insert then select
        self.find_by_id(event.id)
            .await?
            .ok_or_else(|| SeatbookError::Internal("Failed to fetch inserted event".to_string()))
    }

    async fn update_details(&self, event: &Event) -> SeatbookResult<Event> {
        debug!("Updating event details: {}", event.id);

        sqlx::query(
            r#"
            UPDATE events
            SET title = ?, description = ?, venue = ?, starts_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(event.starts_at)
        .bind(event.updated_at)
        .bind(event.id.to_string())
        .execute(self.pool.inner())
        .await?;

        // rows_affected is zero for an unchanged row on MySQL, so re-read
        self.find_by_id(event.id)
            .await?
            .ok_or_else(|| SeatbookError::not_found("Event", event.id))
    }

    async fn resize_capacity(&self, id: EventId, new_capacity: i32) -> SeatbookResult<Event> {
        debug!("Resizing event {} to capacity {}", id, new_capacity);

        let mut tx = self.pool.inner().begin().await?;

        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ? FOR UPDATE");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

        let mut event = match row {
            Some(row) => Event::try_from(row)?,
            None => return Err(SeatbookError::not_found("Event", id)),
        };

        // Checked against the locked row; dropping tx on error rolls back
        event.resize(new_capacity)?;

        sqlx::query(
            "UPDATE events SET capacity = ?, available_spots = ?, updated_at = ? WHERE id = ?",
        )
        .bind(event.capacity)
        .bind(event.available_spots)
        .bind(event.updated_at)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Event {} resized to capacity {} ({} spots available)",
            id, event.capacity, event.available_spots
        );
        Ok(event)
    }

    async fn delete_cascade(&self, id: EventId) -> SeatbookResult<u64> {
        debug!("Deleting event with registrations: {}", id);

        let mut tx = self.pool.inner().begin().await?;

        let removed = sqlx::query("DELETE FROM registrations WHERE event_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(SeatbookError::not_found("Event", id));
        }

        tx.commit().await?;
        Ok(removed)
    }

    async fn totals(&self) -> SeatbookResult<EventTotals> {
        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT COUNT(*) AS events,
                   CAST(COALESCE(SUM(capacity), 0) AS SIGNED) AS capacity,
                   CAST(COALESCE(SUM(available_spots), 0) AS SIGNED) AS available_spots
            FROM events
            "#,
        )
        .fetch_one(self.pool.inner())
        .await?;

        Ok(EventTotals {
            events: u64::try_from(row.events).unwrap_or_default(),
            capacity: row.capacity,
            available_spots: row.available_spots,
        })
    }
}

impl std::fmt::Debug for MySqlEventRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlEventRepository").finish_non_exhaustive()
    }
}
