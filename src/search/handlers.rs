use super::advanced::advanced_search;
use super::engine::{autocomplete, basic_search};
use super::types::{AdvancedRecord, AdvancedSearchParams, AutocompleteParams, SearchParams};
use crate::api::AppState;
use crate::api::identity::ClientIdentity;
use crate::api::validate::query_params;
use crate::dataset::PlaceRecord;
use crate::errors::ApiError;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<PlaceRecord>>, ApiError> {
    let query = query_params(params)?.validate()?;
    let records = state.dataset.load().await?;

    let results: Vec<PlaceRecord> =
        basic_search(&records, &query.query, query.limit, query.offset)
            .into_iter()
            .cloned()
            .collect();

    tracing::debug!("/search q={} -> {} results", query.query, results.len());
    Ok(Json(results))
}

pub async fn handle_autocomplete(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<AutocompleteParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let query = query_params(params)?.validate()?;
    let records = state.dataset.load().await?;

    let suggestions = autocomplete(&records, &query.query, query.limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(suggestions))
}

pub async fn handle_search_advanced(
    Extension(state): Extension<Arc<AppState>>,
    identity: ClientIdentity,
    params: Result<Query<AdvancedSearchParams>, QueryRejection>,
) -> Result<Json<Vec<AdvancedRecord>>, ApiError> {
    let query = query_params(params)?.validate()?;
    tracing::info!(
        "/search-advanced: q={:?} district={:?} sort_by={:?} sort_order={:?} limit={} offset={} from {}",
        query.query,
        query.district,
        query.sort_by,
        query.sort_order,
        query.limit,
        query.offset,
        identity.as_str()
    );

    match advanced_search(state.geocoder.as_ref(), &query).await {
        Ok(results) => Ok(Json(results)),
        Err(e) => {
            tracing::error!("Nominatim request failed: {}", e);
            Err(ApiError::upstream("Nominatim", e))
        }
    }
}
