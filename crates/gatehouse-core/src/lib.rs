//! # gatehouse-core
//!
//! Core crate for Gatehouse. Contains configuration schemas, the unified
//! error system, pagination types, the field-violation type used by the
//! validation pipeline, and the `Clock` trait.
//!
//! This crate has **no** internal dependencies on other Gatehouse crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
