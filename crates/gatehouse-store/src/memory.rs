//! In-memory user store backed by a `RwLock`-guarded map.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::types::pagination::{PageRequest, PageResponse};
use gatehouse_entity::user::{User, UserStore};

/// An in-memory [`UserStore`].
///
/// Listing is ordered by creation time so pagination is stable across
/// calls.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// User records keyed by ID.
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user directly, bypassing uniqueness checks. Test seam.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(identifier) || u.username == identifier)
            .cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email) || u.username == username)
            .cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(AppError::conflict(format!(
                "User {} already exists",
                user.id
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let users = self.users.read().await;
        let total = users.len() as u64;

        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let items: Vec<User> = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}
