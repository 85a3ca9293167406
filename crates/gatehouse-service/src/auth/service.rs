//! The auth orchestrator — register, login, refresh, profile, logout,
//! and user-listing use cases over the injected user store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gatehouse_auth::password::PasswordHasher;
use gatehouse_auth::token::{TokenPair, TokenService};
use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::clock::Clock;
use gatehouse_core::types::pagination::{PageRequest, PageResponse};
use gatehouse_entity::user::{
    NotificationSettings, PrivacySettings, Role, Theme, User, UserProfile, UserStore,
};

use crate::context::Principal;

/// Uniform message for failed logins. Never reveals whether the
/// identifier or the password was wrong.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Uniform message for any refresh failure.
const INVALID_REFRESH: &str = "Invalid refresh token";

/// Validated input for user registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Email address (validated upstream).
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Plaintext password (hashed here, never stored).
    pub password: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

/// Profile fields a user may update about themselves.
///
/// Password and role are deliberately unreachable through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New avatar URL.
    pub avatar: Option<String>,
    /// Preference changes (top-level sections replaced wholesale).
    pub preferences: Option<PreferencesUpdate>,
}

/// Partial preference update; absent sections are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    /// New theme.
    pub theme: Option<Theme>,
    /// New language tag.
    pub language: Option<String>,
    /// Replacement notification settings.
    pub notifications: Option<NotificationSettings>,
    /// Replacement privacy settings.
    pub privacy: Option<PrivacySettings>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user, with login timestamps touched.
    pub user: User,
    /// The freshly issued token pair.
    pub tokens: TokenPair,
}

/// Orchestrates the authentication use cases.
///
/// Holds no cross-request mutable state; every request is handled
/// independently against the injected store.
#[derive(Clone)]
pub struct AuthService {
    /// Injected user persistence.
    store: Arc<dyn UserStore>,
    /// Credential hasher.
    hasher: Arc<PasswordHasher>,
    /// Token issuance and verification.
    tokens: Arc<TokenService>,
    /// Time source for login/update timestamps.
    clock: Arc<dyn Clock>,
    /// Budget for each store call.
    store_timeout: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service with all required dependencies.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenService>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            clock,
            store_timeout: Duration::from_secs(config.store_timeout_seconds),
        }
    }

    /// Registers a new user.
    ///
    /// Flow: uniqueness check → hash password → construct user with the
    /// `user` role, derived permissions, and an unverified email →
    /// persist. Returns the stored record.
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        let email = input.email.trim().to_lowercase();
        let username = input.username.trim().to_string();

        let existing = self
            .store_call(self.store.find_by_email_or_username(&email, &username))
            .await?;

        if existing.is_some() {
            warn!(username = %username, "Registration rejected: identifier taken");
            return Err(AppError::conflict(
                "User with this email or username already exists",
            ));
        }

        let password_hash = self.hash_password(input.password).await?;

        let mut user = User::new(email, username, password_hash, Role::User, self.clock.now());
        user.profile = Some(UserProfile {
            first_name: input.first_name,
            last_name: input.last_name,
            ..UserProfile::default()
        });

        let user = self.store_call(self.store.create(user)).await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");

        Ok(user)
    }

    /// Authenticates a user by email-or-username and password.
    ///
    /// Unknown identifier, inactive account, and wrong password all
    /// produce the same 401 message. An unverified email is 403.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .store_call(self.store.find_by_identifier(identifier.trim()))
            .await?
            .filter(|u| u.is_active);

        let Some(mut user) = user else {
            warn!("Login attempt for unknown or inactive identifier");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let password_valid = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;

        if !password_valid {
            warn!(user_id = %user.id, "Login attempt with invalid password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_email_verified {
            return Err(AppError::forbidden("Email not verified"));
        }

        let tokens = self.tokens.issue_pair(&user)?;

        user.touch_login(self.clock.now());
        let user = self.store_call(self.store.update(user)).await?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginOutcome { user, tokens })
    }

    /// Exchanges a valid refresh token for a brand-new token pair.
    ///
    /// The pair is issued from the *current* user record, so role and
    /// permission changes since the original login propagate here. Any
    /// verification failure collapses to a uniform 401.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.tokens.verify_refresh(refresh_token).map_err(|e| {
            warn!(reason = %e, "Refresh token rejected");
            AppError::unauthorized(INVALID_REFRESH)
        })?;

        let user = self
            .store_call(self.store.find_by_id(claims.id))
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                warn!(user_id = %claims.id, "Refresh for unknown or inactive user");
                AppError::unauthorized(INVALID_REFRESH)
            })?;

        let tokens = self.tokens.issue_pair(&user)?;

        info!(user_id = %user.id, "Token pair refreshed");

        Ok(tokens)
    }

    /// Fetches the authenticated user's full record.
    pub async fn get_profile(&self, principal: &Principal) -> AppResult<User> {
        self.store_call(self.store.find_by_id(principal.id))
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Merges profile fields into the authenticated user's record.
    pub async fn update_profile(
        &self,
        principal: &Principal,
        input: UpdateProfileInput,
    ) -> AppResult<User> {
        let mut user = self.get_profile(principal).await?;

        let profile = user.profile.get_or_insert_with(UserProfile::default);

        if let Some(first_name) = input.first_name {
            profile.first_name = Some(first_name);
        }
        if let Some(last_name) = input.last_name {
            profile.last_name = Some(last_name);
        }
        if let Some(bio) = input.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar) = input.avatar {
            profile.avatar = Some(avatar);
        }
        if let Some(prefs) = input.preferences {
            if let Some(theme) = prefs.theme {
                profile.preferences.theme = theme;
            }
            if let Some(language) = prefs.language {
                profile.preferences.language = language;
            }
            if let Some(notifications) = prefs.notifications {
                profile.preferences.notifications = notifications;
            }
            if let Some(privacy) = prefs.privacy {
                profile.preferences.privacy = privacy;
            }
        }

        user.updated_at = self.clock.now();

        let user = self.store_call(self.store.update(user)).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(user)
    }

    /// Logs the user out.
    ///
    /// Stateless: there is no server-side session to destroy, and issued
    /// tokens remain valid until their embedded expiry. Clients are told
    /// to discard both tokens.
    pub async fn logout(&self, principal: &Principal) {
        info!(user_id = %principal.id, "User logged out");
    }

    /// Lists users with pagination.
    pub async fn list_users(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.store_call(self.store.list(page)).await
    }

    /// Runs a store call under the configured timeout. An elapsed
    /// timeout surfaces as 503, never a hang.
    async fn store_call<T>(
        &self,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .map_err(|_| AppError::service_unavailable("User store did not respond in time"))?
    }

    /// Hashes a password on the blocking pool so concurrent logins do
    /// not starve the request executor.
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Verifies a password on the blocking pool.
    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }
}
