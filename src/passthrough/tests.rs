//! Passthrough Module Tests
//!
//! Response shaping only; the upstream services themselves are not contacted.

#[cfg(test)]
mod tests {
    use crate::passthrough::PassthroughClient;
    use crate::passthrough::types::{IpApiPayload, LocationResponse, NearbyResponse};
    use serde_json::json;

    #[test]
    fn test_nearby_placeholder_echoes_coordinates() {
        let value = serde_json::to_value(NearbyResponse::placeholder(27.7, 85.3)).unwrap();

        assert_eq!(
            value,
            json!({
                "location": {"lat": 27.7, "lon": 85.3},
                "nearby": [
                    {"name": "Museum of History", "type": "Attraction", "distance_km": 0.5},
                    {"name": "Central Coffee House", "type": "Cafe", "distance_km": 0.3}
                ]
            })
        );
    }

    #[test]
    fn test_location_renames_region() {
        let payload: IpApiPayload = serde_json::from_value(json!({
            "status": "success",
            "city": "Kathmandu",
            "regionName": "Bagmati Province",
            "country": "Nepal",
            "lat": 27.7,
            "lon": 85.3
        }))
        .unwrap();

        let location = LocationResponse::from_payload("1.2.3.4", payload);
        assert_eq!(location.region.as_deref(), Some("Bagmati Province"));
        assert_eq!(location.ip, "1.2.3.4");
    }

    #[test]
    fn test_location_tolerates_failed_lookup_body() {
        let payload: IpApiPayload =
            serde_json::from_value(json!({"status": "fail", "message": "private range"})).unwrap();

        let value = serde_json::to_value(LocationResponse::from_payload("127.0.0.1", payload)).unwrap();
        assert_eq!(
            value,
            json!({
                "ip": "127.0.0.1",
                "city": null,
                "region": null,
                "country": null,
                "lat": null,
                "lon": null
            })
        );
    }

    #[test]
    fn test_lookup_url_appends_ip() {
        let client = PassthroughClient::new(
            reqwest::Client::new(),
            "http://ip-api.com/json/",
            "https://api.open-meteo.com/v1/forecast",
        );
        assert_eq!(client.lookup_url("8.8.8.8"), "http://ip-api.com/json/8.8.8.8");
    }
}
