//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, and injects the authenticated principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_core::error::AppError;
use gatehouse_service::context::Principal;

use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
///
/// Absence or failure of the credential is 401; insufficient rights on
/// an authenticated principal are the RBAC layer's 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Access token required"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.token_service.verify_access(token)?;

        Ok(AuthUser(Principal::from(claims)))
    }
}
