//! RBAC enforcement — role membership and permission superset checks.
//!
//! Enforcement assumes an already-authenticated principal; a missing
//! principal is the extractor's 401, an insufficient one is a 403 here.
//! The two are never conflated.

use gatehouse_core::error::AppError;
use gatehouse_entity::user::{Permission, Role};

/// Enforces role- and permission-based access for protected operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks that `role` is one of the allowed roles.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AppError::Forbidden)` if not.
    pub fn require_role(&self, role: Role, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' is not permitted for this operation"
            )))
        }
    }

    /// Checks that `held` is a superset of `required`.
    pub fn require_permissions(
        &self,
        held: &[Permission],
        required: &[Permission],
    ) -> Result<(), AppError> {
        let missing: Vec<&Permission> =
            required.iter().filter(|p| !held.contains(p)).collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::forbidden("Insufficient permissions"))
        }
    }

    /// Checks a single permission (returns bool).
    pub fn has_permission(&self, held: &[Permission], permission: Permission) -> bool {
        held.contains(&permission)
    }
}
