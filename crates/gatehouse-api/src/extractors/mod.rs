//! Request extractors.

pub mod auth;
pub mod pagination;
pub mod validated;

pub use auth::AuthUser;
pub use pagination::ValidatedPagination;
pub use validated::ValidatedJson;
