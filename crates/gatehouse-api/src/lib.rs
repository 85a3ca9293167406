//! # gatehouse-api
//!
//! HTTP API layer for Gatehouse built on Axum.
//!
//! Provides the REST endpoints, request validation pipeline, extractors,
//! middleware (request logging, error normalization), DTOs, and the
//! error-to-response mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod validation;

pub use router::build_router;
pub use state::AppState;
