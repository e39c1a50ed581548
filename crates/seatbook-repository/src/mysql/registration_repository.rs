//! MySQL registration repository implementation.

use super::rows::{
    is_foreign_key_violation, is_unique_violation, parse_uuid, RegistrationEventRow,
    RegistrationRow, REGISTRATION_COLUMNS,
};
use crate::{
    traits::RegistrationRepository, DatabasePoolInterface, EventRegistrationStats,
    RegistrationWithEvent, StatusCounts,
};
use async_trait::async_trait;
use seatbook_core::{
    EventId, Registration, RegistrationId, RegistrationStatus, SeatbookError, SeatbookResult,
    UserId,
};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL registration repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = RegistrationRepository)]
pub struct MySqlRegistrationRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlRegistrationRepository {
    /// Creates a new MySQL registration repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventStatsRow {
    id: String,
    title: String,
    capacity: i32,
    available_spots: i32,
    pending: i64,
    approved: i64,
    rejected: i64,
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl RegistrationRepository for MySqlRegistrationRepository {
    async fn find_by_id(&self, id: RegistrationId) -> SeatbookResult<Option<Registration>> {
        debug!("Finding registration by id: {}", id);

        let sql = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ?");
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Registration::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> SeatbookResult<Vec<RegistrationWithEvent>> {
        debug!("Finding registrations for user: {}", user_id);

        let rows = sqlx::query_as::<_, RegistrationEventRow>(
            r#"
            SELECT r.id, r.user_id, r.event_id, r.status, r.approved_by, r.reason,
                   r.created_at, r.updated_at,
                   e.id AS e_id, e.title AS e_title, e.description AS e_description,
                   e.venue AS e_venue, e.starts_at AS e_starts_at, e.capacity AS e_capacity,
                   e.available_spots AS e_available_spots, e.created_by AS e_created_by,
                   e.created_at AS e_created_at, e.updated_at AS e_updated_at
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.user_id = ?
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter()
            .map(|row| {
                let (registration, event) = row.into_parts()?;
                Ok(RegistrationWithEvent {
                    registration,
                    event,
                })
            })
            .collect()
    }

    async fn find_by_event(&self, event_id: EventId) -> SeatbookResult<Vec<Registration>> {
        debug!("Finding registrations for event: {}", event_id);

        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = ? \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(event_id.to_string())
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn exists_for(&self, user_id: UserId, event_id: EventId) -> SeatbookResult<bool> {
        let result: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM registrations WHERE user_id = ? AND event_id = ? LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn save(&self, registration: &Registration) -> SeatbookResult<Registration> {
        debug!(
            "Saving registration of user {} for event {}",
            registration.user_id, registration.event_id
        );

        let inserted = sqlx::query(
            r#"
            INSERT INTO registrations (id, user_id, event_id, status, approved_by, reason,
                                       created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(registration.id.to_string())
        .bind(registration.user_id.to_string())
        .bind(registration.event_id.to_string())
        .bind(registration.status.as_str())
        .bind(registration.approved_by.map(|id| id.to_string()))
        .bind(&registration.reason)
        .bind(registration.created_at)
        .bind(registration.updated_at)
        .execute(self.pool.inner())
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(SeatbookError::DuplicateRegistration(format!(
                    "user {} is already registered for event {}",
                    registration.user_id, registration.event_id
                )));
            }
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(SeatbookError::not_found("Event", registration.event_id));
            }
            Err(e) => return Err(e.into()),
        }

        self.find_by_id(registration.id).await?.ok_or_else(|| {
            SeatbookError::Internal("Failed to fetch inserted registration".to_string())
        })
    }

    async fn delete_pending(&self, id: RegistrationId) -> SeatbookResult<bool> {
        debug!("Deleting pending registration: {}", id);

        let result = sqlx::query("DELETE FROM registrations WHERE id = ? AND status = ?")
            .bind(id.to_string())
            .bind(RegistrationStatus::Pending.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> SeatbookResult<StatusCounts> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM registrations GROUP BY status")
                .fetch_all(self.pool.inner())
                .await?;

        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            match status.parse::<RegistrationStatus>()? {
                RegistrationStatus::Pending => counts.pending = count(n),
                RegistrationStatus::Approved => counts.approved = count(n),
                RegistrationStatus::Rejected => counts.rejected = count(n),
            }
        }
        Ok(counts)
    }

    async fn event_stats(&self) -> SeatbookResult<Vec<EventRegistrationStats>> {
        let rows = sqlx::query_as::<_, EventStatsRow>(
            r#"
            SELECT e.id, e.title, e.capacity, e.available_spots,
                   CAST(COALESCE(SUM(r.status = 'pending'), 0) AS SIGNED) AS pending,
                   CAST(COALESCE(SUM(r.status = 'approved'), 0) AS SIGNED) AS approved,
                   CAST(COALESCE(SUM(r.status = 'rejected'), 0) AS SIGNED) AS rejected
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id, e.title, e.capacity, e.available_spots, e.starts_at
            ORDER BY e.starts_at ASC, e.id ASC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(EventRegistrationStats {
                    event_id: EventId::from_uuid(parse_uuid(&row.id)?),
                    title: row.title,
                    capacity: row.capacity,
                    available_spots: row.available_spots,
                    counts: StatusCounts {
                        pending: count(row.pending),
                        approved: count(row.approved),
                        rejected: count(row.rejected),
                    },
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for MySqlRegistrationRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlRegistrationRepository")
            .finish_non_exhaustive()
    }
}
