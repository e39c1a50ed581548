//! Registration service trait definition.
//!
//! A registration is created `pending` and decided exactly once:
//!
//! ```text
//! pending ──approve──▶ approved   (takes one seat)
//!    │
//!    └────reject────▶ rejected
//! ```
//!
//! Only a pending registration can be cancelled by its owner.

use crate::dto::{CreateRegistrationRequest, RegistrationResponse, RegistrationWithEventResponse};
use async_trait::async_trait;
use seatbook_core::{Decision, Interface, RegistrationId, SeatbookResult, UserId};

/// Registration service trait.
#[async_trait]
pub trait RegistrationService: Interface + Send + Sync {
    /// Registers the user for an event.
    async fn register(
        &self,
        user_id: UserId,
        request: CreateRegistrationRequest,
    ) -> SeatbookResult<RegistrationResponse>;

    /// Lists the user's registrations, newest first, with their events.
    async fn my_registrations(
        &self,
        user_id: UserId,
    ) -> SeatbookResult<Vec<RegistrationWithEventResponse>>;

    /// Applies an admin decision to a pending registration.
    async fn decide(
        &self,
        id: RegistrationId,
        decision: Decision,
        admin_id: UserId,
        reason: Option<String>,
    ) -> SeatbookResult<RegistrationResponse>;

    /// Withdraws a pending registration on behalf of its owner.
    async fn cancel(&self, id: RegistrationId, requester: UserId) -> SeatbookResult<()>;
}
