//! JSON body extractor that runs the validation pipeline.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use gatehouse_core::error::AppError;
use gatehouse_core::types::violation::FieldLocation;

use crate::validation;

/// Deserializes the JSON body and applies the DTO's declarative rules.
///
/// All invalid fields are collected before rejecting, so the caller
/// receives the complete error set in one round trip.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Malformed request body: {e}")))?;

        value
            .validate()
            .map_err(|e| validation::into_app_error(&e, FieldLocation::Body))?;

        Ok(ValidatedJson(value))
    }
}
