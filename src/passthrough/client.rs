use super::types::IpApiPayload;
use crate::errors::UpstreamError;
use serde_json::Value;

pub const WEATHER_DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// HTTP client for the location and weather services.
#[derive(Clone)]
pub struct PassthroughClient {
    http_client: reqwest::Client,
    ip_api_url: String,
    weather_url: String,
}

impl PassthroughClient {
    pub fn new(http_client: reqwest::Client, ip_api_url: &str, weather_url: &str) -> Self {
        Self {
            http_client,
            ip_api_url: ip_api_url.trim_end_matches('/').to_string(),
            weather_url: weather_url.to_string(),
        }
    }

    pub fn lookup_url(&self, ip: &str) -> String {
        format!("{}/{}", self.ip_api_url, ip)
    }

    pub async fn lookup_ip(&self, ip: &str) -> Result<IpApiPayload, UpstreamError> {
        let response = self.http_client.get(self.lookup_url(ip)).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                status: response.status(),
            });
        }
        Ok(response.json::<IpApiPayload>().await?)
    }

    /// Returns the forecast body untouched. A non-2xx answer is reported as
    /// `UpstreamError::Status` so the caller can decide how to degrade.
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Value, UpstreamError> {
        let response = self
            .http_client
            .get(&self.weather_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("daily", WEATHER_DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                status: response.status(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}
