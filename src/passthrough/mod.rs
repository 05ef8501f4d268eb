//! Passthrough Module
//!
//! Thin proxies to third-party services that sit beside the lookup API. None of
//! them touch the dataset, the rate limiter or the favorites store.
//!
//! ## Endpoints
//! - **`/location`**: Approximate caller location from an IP geolocation service.
//! - **`/weather`**: Daily forecast for a coordinate pair, passed through as JSON.
//! - **`/nearby`**: Fixed placeholder points of interest.
//! - **`/health`**: Liveness probe.

pub mod client;
pub mod handlers;
pub mod types;

pub use client::PassthroughClient;

#[cfg(test)]
mod tests;
