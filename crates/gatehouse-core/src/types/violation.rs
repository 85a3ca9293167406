//! Structured field-level validation failures.

use serde::{Deserialize, Serialize};

/// Where in the request the offending field was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// JSON request body.
    Body,
    /// URL query string.
    Query,
    /// Path parameter.
    Param,
}

/// A single field-level validation failure.
///
/// The offending `value` is echoed back only outside production; the
/// response layer strips it before serializing a production response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Name of the field that failed validation.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// The submitted value, if capturable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Which part of the request carried the field.
    pub location: FieldLocation,
}

impl FieldViolation {
    /// Create a new violation for a body field.
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<serde_json::Value>,
        location: FieldLocation,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
            location,
        }
    }

    /// Return a copy with the offending value removed.
    pub fn without_value(&self) -> Self {
        Self {
            value: None,
            ..self.clone()
        }
    }
}
