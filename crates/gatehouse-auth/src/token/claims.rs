//! Claim payloads embedded in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_entity::user::{Permission, Role};

/// Wire value of the `type` claim on access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";
/// Wire value of the `type` claim on refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims carried by an access token.
///
/// Access tokens are stateless bearer credentials: everything a request
/// needs to authorize — identity, role, and the effective permission
/// set — travels in the token, so verification requires no store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The user ID.
    pub id: Uuid,
    /// Email address at issuance time.
    pub email: String,
    /// Role at issuance time.
    pub role: Role,
    /// Effective permissions at issuance time.
    pub permissions: Vec<Permission>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token type marker, always `"access"`.
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Claims carried by a refresh token.
///
/// Deliberately minimal: only the subject and the type marker, so a
/// leaked refresh token reveals nothing about the account's rights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// The user ID.
    pub id: Uuid,
    /// Token type marker, always `"refresh"`.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token is expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

impl RefreshClaims {
    /// Checks whether this token is expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
