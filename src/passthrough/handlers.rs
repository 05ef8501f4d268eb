use super::types::{CoordinateParams, HealthResponse, LocationResponse, NearbyResponse};
use crate::api::AppState;
use crate::api::identity::ClientIdentity;
use crate::api::validate::query_params;
use crate::errors::{ApiError, UpstreamError};
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::{Extension, Json};
use serde_json::{Value, json};
use std::sync::Arc;

pub const WEATHER_UNAVAILABLE: &str = "Weather data not available.";

pub async fn handle_location(
    Extension(state): Extension<Arc<AppState>>,
    identity: ClientIdentity,
) -> Result<Json<LocationResponse>, ApiError> {
    let payload = state
        .passthrough
        .lookup_ip(identity.as_str())
        .await
        .map_err(|e| ApiError::upstream("IP lookup", e))?;

    Ok(Json(LocationResponse::from_payload(identity.as_str(), payload)))
}

pub async fn handle_weather(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<CoordinateParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let coords = query_params(params)?;

    match state.passthrough.forecast(coords.lat, coords.lon).await {
        Ok(forecast) => Ok(Json(forecast)),
        Err(UpstreamError::Status { status }) => {
            tracing::warn!("Forecast service answered {}", status);
            Ok(Json(json!({ "error": WEATHER_UNAVAILABLE })))
        }
        Err(e) => Err(ApiError::upstream("Weather", e)),
    }
}

pub async fn handle_nearby(
    params: Result<Query<CoordinateParams>, QueryRejection>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let coords = query_params(params)?;
    Ok(Json(NearbyResponse::placeholder(coords.lat, coords.lon)))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
