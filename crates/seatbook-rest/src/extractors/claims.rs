//! JWT claims extractors.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use seatbook_core::{SeatbookError, UserId};
use seatbook_security::{Claims, ClaimsExt};

/// Extractor for authenticated caller claims.
///
/// The auth middleware validates the bearer token and stores the claims in
/// the request extensions; this extractor only reads them back.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: Claims,
    pub user_id: UserId,
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.claims
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| SeatbookError::unauthorized("Missing authorization header"))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(SeatbookError::unauthorized("Invalid authorization format").into());
        }

        // Claims are absent when the middleware rejected the token
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| SeatbookError::unauthorized("Invalid or expired token"))?;

        let user_id = claims.user_id()?;
        Ok(Self { claims, user_id })
    }
}

/// Extractor for an authenticated caller holding the admin role.
///
/// Fails with 401 without a valid token and 403 for any other role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl std::ops::Deref for AdminUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        user.claims.require_admin()?;
        Ok(Self(user))
    }
}
