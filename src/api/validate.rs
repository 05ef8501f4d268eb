//! Caller-facing validation, applied before any request reaches the core.

use crate::errors::ApiError;
use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};

/// Unwraps a query-string extraction, reporting malformed parameters as validation errors.
pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params
        .map(|Query(inner)| inner)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Unwraps a JSON body extraction, reporting malformed bodies as validation errors.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Length is counted in characters, not bytes.
pub fn require_min_chars(field: &str, value: &str, min: usize) -> Result<(), ApiError> {
    if value.chars().count() < min {
        return Err(ApiError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

pub fn require_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ApiError> {
    if value < min || value > max {
        return Err(ApiError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(())
}
