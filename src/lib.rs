//! PlaceFinder Library
//!
//! Postal-code lookup for places in Nepal, served over HTTP. The binary
//! (`main.rs`) only parses configuration and starts the server.
//!
//! ## Architecture Modules
//! - **`dataset`**: Loads the postal-code CSV once and caches it for the process lifetime.
//! - **`search`**: Substring search and autocomplete over the dataset, plus the advanced
//!   search pipeline backed by an upstream geocoder.
//! - **`ratelimit`**: Per-identity fixed-window admission control.
//! - **`favorites`**: Per-identity saved places with in-memory and SQLite backends.
//! - **`passthrough`**: Location, weather, nearby and health endpoints.
//! - **`api`**: Router assembly, caller identity and request validation.
//! - **`config`**: Command-line and environment configuration.
//! - **`errors`**: The HTTP-facing error type and its status mapping.

pub mod api;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod favorites;
pub mod passthrough;
pub mod ratelimit;
pub mod search;

use crate::api::AppState;
use crate::config::{Config, FavoritesBackend};
use crate::dataset::DatasetCache;
use crate::favorites::{FavoritesRepository, MemoryFavorites, SqliteFavorites};
use crate::passthrough::PassthroughClient;
use crate::ratelimit::{MemoryCounterStore, RateLimiter};
use crate::search::geocoder::NominatimClient;

use anyhow::Context;
use std::sync::Arc;

/// Builds every shared component from `config`.
///
/// The dataset is loaded eagerly so a missing or malformed file stops startup.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let dataset = Arc::new(DatasetCache::new(&config.dataset));
    dataset
        .load()
        .await
        .with_context(|| format!("loading dataset {}", config.dataset.display()))?;

    let http_client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.upstream_timeout())
        .build()
        .context("building HTTP client")?;

    let favorites: Arc<dyn FavoritesRepository> = match config.favorites_backend {
        FavoritesBackend::Sqlite => {
            tracing::info!("Favorites stored in {}", config.favorites_db.display());
            Arc::new(
                SqliteFavorites::open(&config.favorites_db)
                    .with_context(|| format!("opening {}", config.favorites_db.display()))?,
            )
        }
        FavoritesBackend::Memory => {
            tracing::warn!("Favorites kept in memory; they will not survive a restart");
            Arc::new(MemoryFavorites::new())
        }
    };

    let policy = config.rate_limit_policy();
    tracing::info!(
        "Rate limit: {} requests per {}s (autocomplete gated: {})",
        policy.max_requests,
        policy.window_secs(),
        config.limit_autocomplete
    );

    Ok(Arc::new(AppState {
        dataset,
        geocoder: Arc::new(NominatimClient::new(
            http_client.clone(),
            &config.nominatim_url,
        )),
        favorites,
        rate_limiter: Arc::new(RateLimiter::new(
            policy,
            Arc::new(MemoryCounterStore::new()),
        )),
        passthrough: PassthroughClient::new(http_client, &config.ip_api_url, &config.weather_url),
        limit_autocomplete: config.limit_autocomplete,
    }))
}
