//! Request DTOs with declarative validation rules.

use serde::Deserialize;
use validator::Validate;

use gatehouse_service::auth::{PreferencesUpdate, RegisterInput, UpdateProfileInput};

use crate::validation::{password_complexity, username_charset};

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    /// Desired username.
    #[validate(
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"),
        custom(function = username_charset)
    )]
    pub username: String,
    /// Password.
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters long"),
        custom(function = password_complexity)
    )]
    pub password: String,
    /// Password confirmation; must equal `password`.
    #[validate(must_match(
        other = password,
        message = "Password confirmation does not match password"
    ))]
    pub confirm_password: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Login request body. `username` accepts an email or a username.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email or username.
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Extend the session lifetime client-side. Accepted for
    /// compatibility; token TTLs are fixed server-side.
    #[serde(default)]
    pub remember_me: Option<bool>,
}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Profile update request body — a subset of profile fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New given name.
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,
    /// New biography.
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    /// New avatar URL.
    #[validate(length(min = 1, max = 300, message = "Avatar must be 1-300 characters"))]
    pub avatar: Option<String>,
    /// Preference changes.
    pub preferences: Option<PreferencesUpdate>,
}

impl From<UpdateProfileRequest> for UpdateProfileInput {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            avatar: req.avatar,
            preferences: req.preferences,
        }
    }
}

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PaginationQuery {
    /// Page number (1-based, default 1).
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u64>,
}
