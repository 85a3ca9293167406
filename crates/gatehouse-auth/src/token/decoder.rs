//! Token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

/// Why a token failed verification.
///
/// Expiry is reported separately from every other failure so callers can
/// tell a client to refresh rather than re-authenticate.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The token's expiry claim is in the past.
    #[error("Token has expired")]
    Expired,
    /// The token is malformed, mis-signed, or of the wrong type.
    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::unauthorized("Token expired"),
            TokenError::Invalid(_) => AppError::unauthorized("Invalid token"),
        }
    }
}

/// Validates signed tokens.
///
/// Signature and structural checks are delegated to `jsonwebtoken`;
/// expiry is checked against the caller-supplied instant so that the
/// injected clock stays authoritative.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (exp handled manually).
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    ///
    /// Checks signature validity, the `type` claim, and expiry
    /// relative to `now`.
    pub fn decode_access(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, TokenError> {
        let claims = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(TokenError::Invalid(format!(
                "expected access token, got '{}'",
                claims.token_type
            )));
        }

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token.
    pub fn decode_refresh(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshClaims, TokenError> {
        let claims = decode::<RefreshClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(TokenError::Invalid(format!(
                "expected refresh token, got '{}'",
                claims.token_type
            )));
        }

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
