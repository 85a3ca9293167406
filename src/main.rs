//! Gatehouse server — standalone authentication and authorization service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{EnvFilter, fmt};

use gatehouse_api::state::AppState;
use gatehouse_auth::password::PasswordHasher;
use gatehouse_auth::rbac::RbacEnforcer;
use gatehouse_auth::token::TokenService;
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::traits::clock::{Clock, SystemClock};
use gatehouse_entity::user::UserStore;
use gatehouse_service::auth::AuthService;
use gatehouse_store::MemoryUserStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("GATEHOUSE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting Gatehouse v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    if config.is_production() && config.auth.jwt_secret == "CHANGE_ME_IN_PRODUCTION" {
        return Err(AppError::configuration(
            "auth.jwt_secret must be set in production",
        ));
    }

    // ── Step 1: Initialize the user store ────────────────────────
    // This binary wires the in-memory store; deployments with a real
    // datastore supply their own `UserStore` implementation here.
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());

    // ── Step 2: Initialize the auth system ───────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher = Arc::new(PasswordHasher::new());
    let token_service = Arc::new(TokenService::new(&config.auth, Arc::clone(&clock)));
    let rbac = Arc::new(RbacEnforcer::new());
    let auth_service = Arc::new(AuthService::new(
        store,
        password_hasher,
        Arc::clone(&token_service),
        clock,
        &config.auth,
    ));

    // ── Step 3: Build and start the HTTP server ──────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        auth_service,
        token_service,
        rbac,
        started_at: Instant::now(),
    };

    let app = gatehouse_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Gatehouse listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Gatehouse shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
