//! Permission vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An atomic capability checked before allowing an operation.
///
/// The vocabulary is closed; permission sets are compared by membership,
/// never by order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// List and read user records.
    #[serde(rename = "read:users")]
    ReadUsers,
    /// Modify user records.
    #[serde(rename = "write:users")]
    WriteUsers,
    /// Deactivate or remove user records.
    #[serde(rename = "delete:users")]
    DeleteUsers,
    /// Read administrative views.
    #[serde(rename = "read:admin")]
    ReadAdmin,
    /// Modify administrative settings.
    #[serde(rename = "write:admin")]
    WriteAdmin,
    /// Assign and revoke roles.
    #[serde(rename = "manage:roles")]
    ManageRoles,
    /// Grant and revoke explicit permissions.
    #[serde(rename = "manage:permissions")]
    ManagePermissions,
    /// Read analytics data.
    #[serde(rename = "read:analytics")]
    ReadAnalytics,
    /// Write analytics data.
    #[serde(rename = "write:analytics")]
    WriteAnalytics,
    /// Full system management.
    #[serde(rename = "manage:system")]
    ManageSystem,
}

impl Permission {
    /// Return the permission as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadUsers => "read:users",
            Self::WriteUsers => "write:users",
            Self::DeleteUsers => "delete:users",
            Self::ReadAdmin => "read:admin",
            Self::WriteAdmin => "write:admin",
            Self::ManageRoles => "manage:roles",
            Self::ManagePermissions => "manage:permissions",
            Self::ReadAnalytics => "read:analytics",
            Self::WriteAnalytics => "write:analytics",
            Self::ManageSystem => "manage:system",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = gatehouse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read:users" => Ok(Self::ReadUsers),
            "write:users" => Ok(Self::WriteUsers),
            "delete:users" => Ok(Self::DeleteUsers),
            "read:admin" => Ok(Self::ReadAdmin),
            "write:admin" => Ok(Self::WriteAdmin),
            "manage:roles" => Ok(Self::ManageRoles),
            "manage:permissions" => Ok(Self::ManagePermissions),
            "read:analytics" => Ok(Self::ReadAnalytics),
            "write:analytics" => Ok(Self::WriteAnalytics),
            "manage:system" => Ok(Self::ManageSystem),
            _ => Err(gatehouse_core::AppError::validation(format!(
                "Unknown permission: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let json = serde_json::to_string(&Permission::ReadUsers).unwrap();
        assert_eq!(json, "\"read:users\"");
        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Permission::ReadUsers);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("read:users".parse::<Permission>().is_ok());
        assert!("read:mail".parse::<Permission>().is_err());
    }
}
