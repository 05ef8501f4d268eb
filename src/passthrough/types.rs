use serde::{Deserialize, Serialize};

/// The subset of the IP geolocation answer that is forwarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpApiPayload {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, rename = "regionName")]
    pub region_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationResponse {
    pub ip: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationResponse {
    pub fn from_payload(ip: &str, payload: IpApiPayload) -> Self {
        Self {
            ip: ip.to_string(),
            city: payload.city,
            region: payload.region_name,
            country: payload.country,
            lat: payload.lat,
            lon: payload.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CoordinateParams {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResponse {
    pub location: Coordinates,
    pub nearby: Vec<NearbyPlace>,
}

impl NearbyResponse {
    /// Placeholder points of interest; the coordinates are only echoed back.
    pub fn placeholder(lat: f64, lon: f64) -> Self {
        Self {
            location: Coordinates { lat, lon },
            nearby: vec![
                NearbyPlace {
                    name: "Museum of History",
                    kind: "Attraction",
                    distance_km: 0.5,
                },
                NearbyPlace {
                    name: "Central Coffee House",
                    kind: "Cafe",
                    distance_km: 0.3,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
