//! Geocoding Capability
//!
//! Advanced search is answered by a live geocoding service rather than the local
//! dataset. The `Geocoder` trait is the seam: production uses `NominatimClient`,
//! tests substitute a fixed list of hits.

use super::types::GeocodeHit;
use crate::errors::UpstreamError;

use async_trait::async_trait;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Free-text lookup returning at most `limit` raw results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeHit>, UpstreamError>;
}

/// Client for the Nominatim `/search` endpoint.
///
/// Timeouts and the User-Agent header are configured on the `reqwest::Client`
/// passed in by the caller.
pub struct NominatimClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new(http_client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeHit>, UpstreamError> {
        let limit = limit.to_string();
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                status: response.status(),
            });
        }

        Ok(response.json::<Vec<GeocodeHit>>().await?)
    }
}
