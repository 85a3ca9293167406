//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use gatehouse_api::state::AppState;
use gatehouse_auth::password::PasswordHasher;
use gatehouse_auth::rbac::RbacEnforcer;
use gatehouse_auth::token::TokenService;
use gatehouse_core::config::AppConfig;
use gatehouse_core::traits::clock::{Clock, SystemClock};
use gatehouse_entity::user::{Role, User, UserStore};
use gatehouse_service::auth::AuthService;
use gatehouse_store::MemoryUserStore;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Direct handle on the in-memory store for seeding and assertions.
    pub store: Arc<MemoryUserStore>,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store.
    pub fn new() -> Self {
        let config = AppConfig::default();

        let store = Arc::new(MemoryUserStore::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let password_hasher = Arc::new(PasswordHasher::new());
        let token_service = Arc::new(TokenService::new(&config.auth, Arc::clone(&clock)));
        let rbac = Arc::new(RbacEnforcer::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store) as Arc<dyn UserStore>,
            password_hasher,
            Arc::clone(&token_service),
            clock,
            &config.auth,
        ));

        let app_state = AppState {
            config: Arc::new(config.clone()),
            auth_service,
            token_service,
            rbac,
            started_at: Instant::now(),
        };

        let router = gatehouse_api::router::build_router(app_state);

        Self {
            router,
            store,
            config,
        }
    }

    /// Create a user directly in the store, verified and active.
    pub async fn create_test_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Uuid {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        let mut user = User::new(email, username, hash, role, chrono::Utc::now());
        user.is_email_verified = true;

        let id = user.id;
        self.store.insert(user).await;
        id
    }

    /// Flip the email-verified flag on a registered user, acting as the
    /// external verification collaborator would.
    pub async fn mark_email_verified(&self, username: &str) {
        let user = self
            .store
            .find_by_identifier(username)
            .await
            .expect("store lookup failed")
            .expect("no such user");

        let mut verified = user;
        verified.is_email_verified = true;
        self.store.update(verified).await.expect("update failed");
    }

    /// Login and return the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("accessToken")
            .and_then(|v| v.as_str())
            .expect("No accessToken in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
