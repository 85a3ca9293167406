//! Error normalization middleware.
//!
//! Every handler and extractor failure converges here: the `AppError`
//! rides the response extensions, and this single wrapper rebuilds the
//! body with the request path/method, a timestamp, and diagnostic
//! detail gated on the environment. Rejections are logged with request
//! context and an anonymized identifier only — never a password or a
//! full token.

use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use gatehouse_core::error::AppError;

use crate::error::{build_envelope, status_for};
use crate::state::AppState;

/// Rewrites error responses into the normalized envelope.
pub async fn normalize_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let Some(err) = response.extensions_mut().remove::<AppError>() else {
        return response;
    };

    let status = status_for(err.kind);
    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            kind = %err.kind,
            error = %err.message,
            "Request failed"
        );
    } else {
        warn!(
            method = %method,
            path = %path,
            kind = %err.kind,
            "Request rejected"
        );
    }

    let envelope = build_envelope(
        &err,
        Some(&method),
        Some(&path),
        state.config.is_production(),
    );

    (status, Json(envelope)).into_response()
}
