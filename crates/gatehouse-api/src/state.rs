//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use gatehouse_auth::rbac::RbacEnforcer;
use gatehouse_auth::token::TokenService;
use gatehouse_core::config::AppConfig;
use gatehouse_service::auth::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Auth orchestrator.
    pub auth_service: Arc<AuthService>,
    /// Token verification for the auth extractor.
    pub token_service: Arc<TokenService>,
    /// Role/permission enforcement.
    pub rbac: Arc<RbacEnforcer>,
    /// Process start time, for the health endpoint.
    pub started_at: Instant,
}
