//! # gatehouse-auth
//!
//! Cryptographic and access-control primitives for Gatehouse.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `token` — signed access/refresh token issuance and validation
//! - `rbac` — role- and permission-based access control enforcement

pub mod password;
pub mod rbac;
pub mod token;

pub use password::PasswordHasher;
pub use rbac::RbacEnforcer;
pub use token::{AccessClaims, RefreshClaims, TokenError, TokenPair, TokenService};
