//! MySQL transactions for capacity-affecting writes.

use super::rows::{RegistrationRow, REGISTRATION_COLUMNS};
use crate::{DatabasePoolInterface, StoreTransaction, UnitOfWork};
use async_trait::async_trait;
use seatbook_core::{EventId, Registration, RegistrationId, RegistrationStatus, SeatbookResult};
use shaku::Component;
use sqlx::{MySql, Transaction};
use std::sync::Arc;
use tracing::debug;

/// Opens MySQL transactions.
#[derive(Component, Clone)]
#[shaku(interface = UnitOfWork)]
pub struct MySqlUnitOfWork {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUnitOfWork {
    /// Creates a new unit of work over the pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    async fn begin(&self) -> SeatbookResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.inner().begin().await?;
        Ok(Box::new(MySqlStoreTransaction { tx }))
    }
}

impl std::fmt::Debug for MySqlUnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUnitOfWork").finish_non_exhaustive()
    }
}

/// An open MySQL transaction.
pub struct MySqlStoreTransaction {
    tx: Transaction<'static, MySql>,
}

impl MySqlStoreTransaction {
    async fn read_available_spots(&mut self, event_id: EventId) -> SeatbookResult<Option<i32>> {
        let spots: Option<i32> =
            sqlx::query_scalar("SELECT available_spots FROM events WHERE id = ?")
                .bind(event_id.to_string())
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(spots)
    }
}

#[async_trait]
impl StoreTransaction for MySqlStoreTransaction {
    async fn lock_registration(
        &mut self,
        id: RegistrationId,
    ) -> SeatbookResult<Option<Registration>> {
        let sql = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ? FOR UPDATE");
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.map(Registration::try_from).transpose()
    }

    async fn event_exists(&mut self, event_id: EventId) -> SeatbookResult<bool> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM events WHERE id = ?")
            .bind(event_id.to_string())
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(found.is_some())
    }

    async fn decrement_available_spots(&mut self, event_id: EventId) -> SeatbookResult<Option<i32>> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET available_spots = available_spots - 1, updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ? AND available_spots > 0
            "#,
        )
        .bind(event_id.to_string())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            debug!("No spot taken for event {}", event_id);
            return Ok(None);
        }

        // The UPDATE holds the row lock, so this read sees our own write
        self.read_available_spots(event_id).await
    }

    async fn increment_available_spots(
        &mut self,
        event_id: EventId,
        amount: i32,
    ) -> SeatbookResult<Option<i32>> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET available_spots = available_spots + ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ? AND available_spots + ? <= capacity
            "#,
        )
        .bind(amount)
        .bind(event_id.to_string())
        .bind(amount)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.read_available_spots(event_id).await
    }

    async fn update_registration_status(
        &mut self,
        registration: &Registration,
    ) -> SeatbookResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET status = ?, approved_by = ?, reason = ?, updated_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(registration.status.as_str())
        .bind(registration.approved_by.map(|id| id.to_string()))
        .bind(&registration.reason)
        .bind(registration.updated_at)
        .bind(registration.id.to_string())
        .bind(RegistrationStatus::Pending.as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> SeatbookResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> SeatbookResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
