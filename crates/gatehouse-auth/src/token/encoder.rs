//! Token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds, as reported to clients.
    pub expires_in: u64,
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Generates a new access + refresh token pair for the given user.
    ///
    /// The access token carries identity and authorization claims; the
    /// refresh token carries only the user ID and a type marker.
    pub fn issue_pair(&self, user: &User, now: DateTime<Utc>) -> Result<TokenPair, AppError> {
        let access_exp = now + Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + Duration::days(self.refresh_ttl_days);

        let access_claims = AccessClaims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            permissions: user.permissions.clone(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };

        let refresh_claims = RefreshClaims {
            id: user.id,
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
        };

        let access_token = encode(&Header::default(), &access_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: (self.access_ttl_minutes * 60) as u64,
        })
    }
}
