//! Shared value types used across Gatehouse crates.

pub mod pagination;
pub mod violation;

pub use pagination::{PageRequest, PageResponse};
pub use violation::{FieldLocation, FieldViolation};
