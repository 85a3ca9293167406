//! Pagination query extractor with validation.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use validator::Validate;

use gatehouse_core::error::AppError;
use gatehouse_core::types::pagination::PageRequest;
use gatehouse_core::types::violation::FieldLocation;

use crate::dto::request::PaginationQuery;
use crate::validation;

/// Validated pagination parameters, ready to hand to the store.
#[derive(Debug, Clone)]
pub struct ValidatedPagination(pub PageRequest);

impl<S> FromRequestParts<S> for ValidatedPagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Malformed query string: {e}")))?;

        query
            .validate()
            .map_err(|e| validation::into_app_error(&e, FieldLocation::Query))?;

        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(10);

        Ok(ValidatedPagination(PageRequest::new(page, limit)))
    }
}
