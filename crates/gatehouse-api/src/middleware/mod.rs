//! HTTP middleware.

pub mod error_handler;
pub mod logging;

pub use error_handler::normalize_errors;
pub use logging::request_logging;
