//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::Permission;
use super::role::Role;

/// A registered user.
///
/// Invariant: `permissions` always contains the union of the role's
/// default permissions and any explicitly granted extras. Role
/// transitions go through [`User::change_role`], which re-derives the
/// union. Accounts are never hard-deleted; deactivation clears
/// `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// Login name (unique).
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role (RBAC).
    pub role: Role,
    /// Effective permission set (role defaults plus explicit grants).
    pub permissions: Vec<Permission>,
    /// Whether the account is active (soft deactivation).
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub is_email_verified: bool,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Optional profile sub-document.
    pub profile: Option<UserProfile>,
}

impl User {
    /// Construct a freshly registered user with role defaults applied
    /// and an unverified email address.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            permissions: role.default_permissions().to_vec(),
            is_active: true,
            is_email_verified: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
            profile: None,
        }
    }

    /// Change the role and re-derive the effective permission set.
    ///
    /// Explicit grants (permissions beyond the old role's defaults) are
    /// preserved across the transition.
    pub fn change_role(&mut self, new_role: Role) {
        let old_defaults = self.role.default_permissions();
        let extras: Vec<Permission> = self
            .permissions
            .iter()
            .copied()
            .filter(|p| !old_defaults.contains(p))
            .collect();

        self.role = new_role;
        self.permissions = new_role.default_permissions().to_vec();
        for extra in extras {
            if !self.permissions.contains(&extra) {
                self.permissions.push(extra);
            }
        }
    }

    /// Grant an explicit permission beyond the role defaults.
    pub fn grant_permission(&mut self, permission: Permission) {
        if !self.permissions.contains(&permission) {
            self.permissions.push(permission);
        }
    }

    /// Check whether the user holds the given permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Record a successful login.
    pub fn touch_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

/// Optional profile details attached to a user.
///
/// All fields are nullable by design; presence is explicit rather than
/// inferred from missing keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Short free-text biography.
    pub bio: Option<String>,
    /// UI and communication preferences.
    pub preferences: UserPreferences,
}

/// Per-user preference sub-document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// UI theme.
    pub theme: Theme,
    /// BCP-47 language tag.
    pub language: String,
    /// Notification channel opt-ins.
    pub notifications: NotificationSettings,
    /// Privacy controls.
    pub privacy: PrivacySettings,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            language: "en".to_string(),
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
        }
    }
}

/// UI theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the system setting.
    System,
}

/// Notification channel opt-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Email notifications.
    pub email: bool,
    /// Push notifications.
    pub push: bool,
    /// SMS notifications.
    pub sms: bool,
    /// Marketing communications.
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            sms: false,
            marketing: false,
        }
    }
}

/// Profile visibility controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    /// Who can see the profile.
    pub profile_visibility: Visibility,
    /// Whether the email address is shown on the profile.
    pub show_email: bool,
    /// Whether last-seen time is shown.
    pub show_last_seen: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: Visibility::Friends,
            show_email: false,
            show_last_seen: true,
        }
    }
}

/// Audience for profile visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone.
    Public,
    /// Visible to no one but the owner.
    Private,
    /// Visible to connections only.
    Friends,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: Role) -> User {
        User::new("a@x.com", "alice", "$argon2id$fake", role, Utc::now())
    }

    #[test]
    fn test_new_user_gets_role_defaults() {
        let user = test_user(Role::Moderator);
        assert_eq!(
            user.permissions,
            Role::Moderator.default_permissions().to_vec()
        );
        assert!(!user.is_email_verified);
        assert!(user.is_active);
    }

    #[test]
    fn test_change_role_rederives_permissions() {
        let mut user = test_user(Role::User);
        user.change_role(Role::Moderator);
        assert_eq!(
            user.permissions,
            Role::Moderator.default_permissions().to_vec()
        );
    }

    #[test]
    fn test_change_role_preserves_explicit_grants() {
        let mut user = test_user(Role::Moderator);
        user.grant_permission(Permission::ManageSystem);
        user.change_role(Role::User);
        assert_eq!(user.role, Role::User);
        assert!(user.has_permission(Permission::ManageSystem));
        assert!(!user.has_permission(Permission::ReadUsers));
    }

    #[test]
    fn test_serialized_user_never_exposes_password_hash() {
        let user = test_user(Role::User);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
