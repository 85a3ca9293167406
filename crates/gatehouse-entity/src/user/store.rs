//! The injected user persistence seam.

use async_trait::async_trait;
use uuid::Uuid;

use gatehouse_core::result::AppResult;
use gatehouse_core::types::pagination::{PageRequest, PageResponse};

use super::model::User;

/// Persistence interface for user records.
///
/// The auth core depends only on this trait; tests inject an in-memory
/// implementation and production deployments a real datastore. The
/// implementation is responsible for its own concurrency safety.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user whose email or username equals `identifier`.
    /// Email comparison is case-insensitive.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Find a user matching either the given email or username,
    /// regardless of active state. Used for uniqueness checks.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> AppResult<Option<User>>;

    /// Persist a new user and return the stored record.
    async fn create(&self, user: User) -> AppResult<User>;

    /// Update an existing user and return the stored record.
    async fn update(&self, user: User) -> AppResult<User>;

    /// List users with pagination, ordered by creation time.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;
}
