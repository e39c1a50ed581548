//! JWT token provider for validating (and, in tooling, minting) tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use seatbook_config::SecurityConfig;
use seatbook_core::{Interface, SeatbookError, SeatbookResult, UserId, UserRole};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interface for issuing and checking bearer tokens.
pub trait TokenProviderInterface: Interface {
    /// Generates an access token.
    fn generate_access_token(
        &self,
        user_id: UserId,
        username: &str,
        role: UserRole,
    ) -> SeatbookResult<String>;

    /// Validates a token and returns the claims.
    fn validate_access_token(&self, token: &str) -> SeatbookResult<Claims>;
}

/// JWT token provider service.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Shaku parameters for a provider built from `config`.
    #[must_use]
    pub fn parameters(config: Arc<SecurityConfig>) -> TokenProviderParameters {
        let Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        } = Self::new(config);
        TokenProviderParameters {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_access_token(
        &self,
        user_id: UserId,
        username: &str,
        role: UserRole,
    ) -> SeatbookResult<String> {
        let lifetime = i64::try_from(self.config.jwt_access_expiration_secs).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + Duration::seconds(lifetime);

        let claims = Claims::new_access(
            user_id,
            username.to_string(),
            role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            SeatbookError::Internal(format!("Failed to generate access token: {}", e))
        })?;

        debug!("Generated access token for user {}", user_id);
        Ok(token)
    }

    fn validate_access_token(&self, token: &str) -> SeatbookResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => SeatbookError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        SeatbookError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        SeatbookError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        SeatbookError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => SeatbookError::InvalidToken(e.to_string()),
                }
            })?;

        // Reject tokens whose subject cannot identify a caller
        token_data.claims.user_id()?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
