//! HTTP API Module
//!
//! Wires the core components into an Axum router.
//!
//! ## Route Groups
//! - **Rate-limited**: `/search`, `/search-advanced`, `/favorites`, `/favorites/:postal_code`,
//!   and `/autocomplete` unless gating for it is switched off.
//! - **Open**: `/location`, `/weather`, `/nearby`, `/health`.
//!
//! ## Submodules
//! - **`identity`**: Extracts the opaque caller identity from the connection.
//! - **`validate`**: Query-string validation shared by the handlers.

pub mod identity;
pub mod validate;

use crate::dataset::DatasetCache;
use crate::favorites::FavoritesRepository;
use crate::favorites::handlers::{
    handle_add_favorite, handle_list_favorites, handle_remove_favorite,
};
use crate::passthrough::PassthroughClient;
use crate::passthrough::handlers::{
    handle_health, handle_location, handle_nearby, handle_weather,
};
use crate::ratelimit::RateLimiter;
use crate::ratelimit::middleware::enforce_rate_limit;
use crate::search::geocoder::Geocoder;
use crate::search::handlers::{handle_autocomplete, handle_search, handle_search_advanced};

use axum::routing::{delete, get};
use axum::{Extension, Router, middleware};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared components handed to every handler.
pub struct AppState {
    pub dataset: Arc<DatasetCache>,
    pub geocoder: Arc<dyn Geocoder>,
    pub favorites: Arc<dyn FavoritesRepository>,
    pub rate_limiter: Arc<RateLimiter>,
    pub passthrough: PassthroughClient,
    pub limit_autocomplete: bool,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let mut limited = Router::new()
        .route("/search", get(handle_search))
        .route("/search-advanced", get(handle_search_advanced))
        .route(
            "/favorites",
            get(handle_list_favorites).post(handle_add_favorite),
        )
        .route("/favorites/:postal_code", delete(handle_remove_favorite));

    let mut open = Router::new()
        .route("/location", get(handle_location))
        .route("/weather", get(handle_weather))
        .route("/nearby", get(handle_nearby))
        .route("/health", get(handle_health));

    if state.limit_autocomplete {
        limited = limited.route("/autocomplete", get(handle_autocomplete));
    } else {
        open = open.route("/autocomplete", get(handle_autocomplete));
    }

    let limited = limited.route_layer(middleware::from_fn_with_state(
        state.rate_limiter.clone(),
        enforce_rate_limit,
    ));

    Router::new()
        .merge(limited)
        .merge(open)
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests;
