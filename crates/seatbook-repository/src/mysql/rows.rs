//! Row types shared by the MySQL repositories.

use chrono::{DateTime, Utc};
use seatbook_core::{
    Event, EventId, Registration, RegistrationId, RegistrationStatus, SeatbookError,
    SeatbookResult, UserId,
};
use sqlx::FromRow;
use uuid::Uuid;

pub(crate) const EVENT_COLUMNS: &str = "id, title, description, venue, starts_at, capacity, \
     available_spots, created_by, created_at, updated_at";

pub(crate) const REGISTRATION_COLUMNS: &str =
    "id, user_id, event_id, status, approved_by, reason, created_at, updated_at";

/// Database row representation of an event.
#[derive(Debug, FromRow)]
pub(crate) struct EventRow {
    pub id: String, // MySQL stores UUID as CHAR(36)
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub capacity: i32,
    pub available_spots: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = SeatbookError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::from_uuid(parse_uuid(&row.id)?),
            title: row.title,
            description: row.description,
            venue: row.venue,
            starts_at: row.starts_at,
            capacity: row.capacity,
            available_spots: row.available_spots,
            created_by: UserId::from_uuid(parse_uuid(&row.created_by)?),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row representation of a registration.
#[derive(Debug, FromRow)]
pub(crate) struct RegistrationRow {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub status: String,
    pub approved_by: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = SeatbookError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Registration {
            id: RegistrationId::from_uuid(parse_uuid(&row.id)?),
            user_id: UserId::from_uuid(parse_uuid(&row.user_id)?),
            event_id: EventId::from_uuid(parse_uuid(&row.event_id)?),
            status: row.status.parse::<RegistrationStatus>()?,
            approved_by: row
                .approved_by
                .as_deref()
                .map(parse_uuid)
                .transpose()?
                .map(UserId::from_uuid),
            reason: row.reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A registration joined with its event, event columns prefixed `e_`.
#[derive(Debug, FromRow)]
pub(crate) struct RegistrationEventRow {
    #[sqlx(flatten)]
    pub registration: RegistrationRow,
    pub e_id: String,
    pub e_title: String,
    pub e_description: Option<String>,
    pub e_venue: Option<String>,
    pub e_starts_at: DateTime<Utc>,
    pub e_capacity: i32,
    pub e_available_spots: i32,
    pub e_created_by: String,
    pub e_created_at: DateTime<Utc>,
    pub e_updated_at: DateTime<Utc>,
}

impl RegistrationEventRow {
    pub(crate) fn into_parts(self) -> SeatbookResult<(Registration, Event)> {
        let event = Event::try_from(EventRow {
            id: self.e_id,
            title: self.e_title,
            description: self.e_description,
            venue: self.e_venue,
            starts_at: self.e_starts_at,
            capacity: self.e_capacity,
            available_spots: self.e_available_spots,
            created_by: self.e_created_by,
            created_at: self.e_created_at,
            updated_at: self.e_updated_at,
        })?;
        Ok((Registration::try_from(self.registration)?, event))
    }
}

pub(crate) fn parse_uuid(raw: &str) -> SeatbookResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| SeatbookError::Internal(format!("Invalid UUID in database: {}", e)))
}

/// Checks if the error is a unique key violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Checks if the error is a child row whose parent is missing.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
