//! Maps domain `AppError` to HTTP responses.
//!
//! `IntoResponse` renders a safe default body and stashes the error in
//! the response extensions; the outer `normalize_errors` middleware
//! rebuilds the full envelope with request path/method and
//! environment-appropriate diagnostic detail.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::types::violation::FieldViolation;

use crate::validation;

/// Standard API error envelope. Every failure path converges to this
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error body.
    pub error: ErrorBody,
}

/// The normalized error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable message (generic for 5xx in production).
    pub message: String,
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// ISO-8601 timestamp of the failure.
    pub timestamp: String,
    /// Request path, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Request method, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Structured field violations (validation failures only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldViolation>>,
    /// Remediation suggestions (validation failures only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Diagnostic cause chain, in lieu of a stack trace. Never emitted
    /// in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Maps an error kind to its HTTP status code.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the full envelope for an error in the context of a request.
pub fn build_envelope(
    err: &AppError,
    method: Option<&str>,
    path: Option<&str>,
    production: bool,
) -> ErrorEnvelope {
    let status = status_for(err.kind);

    let message = if production && status == StatusCode::INTERNAL_SERVER_ERROR {
        "Internal Server Error".to_string()
    } else {
        err.message.clone()
    };

    let (validation_errors, suggestions) = if err.violations.is_empty() {
        (None, None)
    } else {
        let suggestions = validation::suggestions_for(&err.violations);
        let violations = if production {
            err.violations.iter().map(|v| v.without_value()).collect()
        } else {
            err.violations.clone()
        };
        (Some(violations), Some(suggestions))
    };

    let stack = if production { None } else { err.source_chain() };

    ErrorEnvelope {
        error: ErrorBody {
            message,
            status_code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
            path: path.map(String::from),
            method: method.map(String::from),
            validation_errors,
            suggestions,
            stack,
        },
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Production-safe fallback; the normalizer middleware replaces
        // this body with one carrying path/method and environment-aware
        // diagnostics.
        let envelope = build_envelope(&self, None, None, true);
        let mut response = (status_for(self.kind), Json(envelope)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gatehouse_core::types::violation::FieldLocation;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::ServiceUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_production_suppresses_server_error_detail() {
        let err = AppError::internal("pool exhausted: worker 3 panicked");
        let envelope = build_envelope(&err, Some("GET"), Some("/auth/profile"), true);

        assert_eq!(envelope.error.message, "Internal Server Error");
        assert!(envelope.error.stack.is_none());

        let dev = build_envelope(&err, Some("GET"), Some("/auth/profile"), false);
        assert!(dev.error.message.contains("pool exhausted"));
    }

    #[test]
    fn test_validation_envelope_carries_violations_and_suggestions() {
        let err = AppError::validation_failed(vec![FieldViolation::new(
            "email",
            "Please provide a valid email address",
            Some(serde_json::json!("nope")),
            FieldLocation::Body,
        )]);

        let envelope = build_envelope(&err, Some("POST"), Some("/auth/register"), false);
        let body = envelope.error;

        assert_eq!(body.status_code, 400);
        assert_eq!(body.validation_errors.as_ref().unwrap().len(), 1);
        assert_eq!(body.suggestions.as_ref().unwrap().len(), 1);
        assert!(
            body.validation_errors.as_ref().unwrap()[0]
                .value
                .is_some()
        );

        // Production keeps the structure but strips submitted values.
        let prod = build_envelope(&err, Some("POST"), Some("/auth/register"), true);
        assert!(
            prod.error.validation_errors.as_ref().unwrap()[0]
                .value
                .is_none()
        );
    }
}
