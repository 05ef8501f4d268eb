use super::types::{FavoriteCandidate, FavoriteEntry, FavoritesResponse};
use crate::api::AppState;
use crate::api::identity::ClientIdentity;
use crate::api::validate::json_body;
use crate::errors::ApiError;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_list_favorites(
    Extension(state): Extension<Arc<AppState>>,
    identity: ClientIdentity,
) -> Result<Json<Vec<FavoriteEntry>>, ApiError> {
    let favorites = state.favorites.list(identity.as_str()).await?;
    Ok(Json(favorites))
}

pub async fn handle_add_favorite(
    Extension(state): Extension<Arc<AppState>>,
    identity: ClientIdentity,
    body: Result<Json<FavoriteCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoritesResponse>), ApiError> {
    let candidate = json_body(body)?;
    tracing::info!(
        "Adding favorite {:?} for {}",
        candidate.postal_code,
        identity.as_str()
    );
    let favorites = state.favorites.add(identity.as_str(), candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(FavoritesResponse {
            ok: true,
            favorites,
        }),
    ))
}

pub async fn handle_remove_favorite(
    Extension(state): Extension<Arc<AppState>>,
    identity: ClientIdentity,
    Path(postal_code): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    tracing::info!("Removing favorite {} for {}", postal_code, identity.as_str());
    let favorites = state
        .favorites
        .remove(identity.as_str(), &postal_code)
        .await?;

    Ok(Json(FavoritesResponse {
        ok: true,
        favorites,
    }))
}
