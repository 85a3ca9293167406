//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_entity::user::{Permission, Role, User, UserProfile};

/// Sanitized user representation. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
    /// Effective permission set.
    pub permissions: Vec<Permission>,
    /// Active flag.
    pub is_active: bool,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Last login time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Profile sub-document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            permissions: user.permissions,
            is_active: user.is_active,
            is_email_verified: user.is_email_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
            profile: user.profile,
        }
    }
}

/// 201 response for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Outcome message.
    pub message: String,
    /// The created user, sanitized.
    pub user: UserDto,
    /// Guidance for the client.
    pub next_steps: Vec<String>,
}

/// 200 response for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Outcome message.
    pub message: String,
    /// The authenticated user, sanitized.
    pub user: UserDto,
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Guidance for the client.
    pub next_steps: Vec<String>,
}

/// 200 response for token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Outcome message.
    pub message: String,
    /// New access token.
    pub access_token: String,
    /// New refresh token (rotation: the pair is fully replaced).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// 200 response for profile fetch/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Outcome message.
    pub message: String,
    /// The user, sanitized.
    pub user: UserDto,
}

/// 200 response for logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    /// Outcome message.
    pub message: String,
    /// Client-side cleanup instructions.
    pub next_steps: Vec<String>,
}

/// Pagination envelope for user listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    /// Current page (1-based).
    pub page: u64,
    /// Items per page.
    pub limit: u64,
    /// Total users across all pages.
    pub total_users: u64,
    /// Total pages.
    pub total_pages: u64,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_prev: bool,
}

/// 200 response for the user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    /// Outcome message.
    pub message: String,
    /// The users on this page, sanitized.
    pub users: Vec<UserDto>,
    /// Pagination envelope.
    pub pagination: PaginationDto,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since process start.
    pub uptime_seconds: u64,
}
