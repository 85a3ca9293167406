//! User role enumeration and the role-to-permission mapping table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::permission::Permission;

/// Roles available in the RBAC system.
///
/// The mapping to default permission sets is fixed at compile time;
/// changing it is a deployment, not a per-request mutation. Adding a
/// role variant forces a mapping decision in [`Role::default_permissions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full system administrator.
    Admin,
    /// Can manage users and read administrative views.
    Moderator,
    /// Regular registered user.
    User,
    /// Unprivileged visitor.
    Guest,
}

impl Role {
    /// Return the default permission set granted by this role.
    pub fn default_permissions(&self) -> &'static [Permission] {
        match self {
            Self::Admin => &[
                Permission::ReadUsers,
                Permission::WriteUsers,
                Permission::DeleteUsers,
                Permission::ReadAdmin,
                Permission::WriteAdmin,
                Permission::ManageRoles,
                Permission::ManagePermissions,
                Permission::ReadAnalytics,
                Permission::WriteAnalytics,
                Permission::ManageSystem,
            ],
            Self::Moderator => &[
                Permission::ReadUsers,
                Permission::WriteUsers,
                Permission::ReadAdmin,
                Permission::ReadAnalytics,
            ],
            Self::User => &[],
            Self::Guest => &[],
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = gatehouse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            _ => Err(gatehouse_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, moderator, user, guest"
            ))),
        }
    }
}
