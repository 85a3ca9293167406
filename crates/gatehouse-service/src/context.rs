//! Request context carrying the authenticated principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_auth::token::claims::AccessClaims;
use gatehouse_entity::user::{Permission, Role};

/// The authenticated identity attached to a request after successful
/// token verification.
///
/// Built entirely from verified access-token claims; no store lookup is
/// involved, so the role and permissions reflect issuance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated user's ID.
    pub id: Uuid,
    /// Email address from the token claims.
    pub email: String,
    /// Role at token issuance time.
    pub role: Role,
    /// Effective permissions at token issuance time.
    pub permissions: Vec<Permission>,
}

impl Principal {
    /// Returns whether the principal holds the given permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Returns whether the principal is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<AccessClaims> for Principal {
    fn from(claims: AccessClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            role: claims.role,
            permissions: claims.permissions,
        }
    }
}
