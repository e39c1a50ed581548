//! Registration entity.

use crate::{EventId, RegistrationId, RegistrationStatus, SeatbookError, SeatbookResult, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's request for a seat at an event.
///
/// Created `Pending`, decided exactly once, and deletable by its owner
/// only while still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique identifier for the registration.
    pub id: RegistrationId,

    /// Requesting user.
    pub user_id: UserId,

    /// Target event.
    pub event_id: EventId,

    /// Current status.
    pub status: RegistrationStatus,

    /// Admin who approved the registration.
    pub approved_by: Option<UserId>,

    /// Free-text reason given with the decision.
    pub reason: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Creates a pending registration.
    #[must_use]
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        let now = Utc::now();
        Self {
            id: RegistrationId::new(),
            user_id,
            event_id,
            status: RegistrationStatus::Pending,
            approved_by: None,
            reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the registration is still awaiting a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RegistrationStatus::Pending)
    }

    /// Checks if the given user made this registration.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Fails with `InvalidTransition` unless the registration is pending.
    pub fn ensure_pending(&self) -> SeatbookResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(SeatbookError::InvalidTransition(format!(
                "registration {} is already {}",
                self.id, self.status
            )))
        }
    }

    /// Marks the registration approved by `admin_id`.
    pub fn approve(&mut self, admin_id: UserId, reason: Option<String>) -> SeatbookResult<()> {
        self.ensure_pending()?;
        self.status = RegistrationStatus::Approved;
        self.approved_by = Some(admin_id);
        self.reason = reason;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the registration rejected.
    pub fn reject(&mut self, reason: Option<String>) -> SeatbookResult<()> {
        self.ensure_pending()?;
        self.status = RegistrationStatus::Rejected;
        self.reason = reason;
        self.updated_at = Utc::now();
        Ok(())
    }
}
