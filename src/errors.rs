//! Application Error Types
//!
//! Errors that cross the HTTP boundary. Component errors (`DatasetError`,
//! `FavoritesError`, `UpstreamError`) are folded into [`ApiError`], which is the
//! only error type handlers return.
//!
//! ## Status Mapping
//! - **Validation** -> `422 Unprocessable Entity`
//! - **Rate limit** -> `429 Too Many Requests`
//! - **Upstream dependency** -> `503 Service Unavailable`
//! - **Storage / dataset** -> `500 Internal Server Error`

use crate::dataset::DatasetError;
use crate::favorites::FavoritesError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure talking to a third-party service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or body decoding failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("upstream responded with status {status}")]
    Status { status: reqwest::StatusCode },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    #[error("{service} request failed: {source}")]
    Upstream {
        service: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("favorites storage failed: {0}")]
    Favorites(#[from] FavoritesError),

    #[error("dataset unavailable: {0}")]
    Dataset(#[from] DatasetError),

    #[error("caller identity unavailable")]
    MissingIdentity,
}

impl ApiError {
    pub fn upstream(service: &'static str, source: UpstreamError) -> Self {
        Self::Upstream { service, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Favorites(_) | ApiError::Dataset(_) | ApiError::MissingIdentity => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
