//! # gatehouse-service
//!
//! Business logic for Gatehouse. The [`auth::AuthService`] orchestrator
//! composes the credential hasher, token service, and injected user
//! store into the register/login/refresh/profile/logout use cases.

pub mod auth;
pub mod context;

pub use auth::AuthService;
pub use context::Principal;
