//! HTTP API Tests
//!
//! Drives the assembled router end to end with an in-memory favorites store, a
//! preloaded dataset and a fake geocoder. No network access.
//!
//! ## Test Scopes
//! - **Search routes**: Response shape and 422 on bad parameters.
//! - **Rate limiting**: 429 past the cap, per-identity counting, ungated routes.
//! - **Advanced search**: Happy path and 503 on upstream failure.
//! - **Favorites**: Add/list/remove envelopes and owner scoping.

#[cfg(test)]
mod tests {
    use crate::api::{AppState, create_router};
    use crate::dataset::{DatasetCache, PlaceRecord};
    use crate::errors::UpstreamError;
    use crate::favorites::MemoryFavorites;
    use crate::passthrough::PassthroughClient;
    use crate::ratelimit::{MemoryCounterStore, RateLimitPolicy, RateLimiter};
    use crate::search::geocoder::Geocoder;
    use crate::search::types::{AddressDetails, GeocodeHit};
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt; // for oneshot

    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<GeocodeHit>, UpstreamError> {
            let hits = vec![
                GeocodeHit {
                    display_name: Some("Pokhara, Kaski, Gandaki Province, Nepal".to_string()),
                    lat: Some("28.2".to_string()),
                    lon: Some("83.9".to_string()),
                    postcode: None,
                    address: AddressDetails {
                        postcode: Some("33700".to_string()),
                        county: Some("Kaski".to_string()),
                        state: Some("Gandaki Province".to_string()),
                    },
                },
                GeocodeHit {
                    display_name: Some("Pokhara Airport".to_string()),
                    ..GeocodeHit::default()
                },
            ];
            Ok(hits.into_iter().take(limit).collect())
        }
    }

    struct DownGeocoder;

    #[async_trait]
    impl Geocoder for DownGeocoder {
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<GeocodeHit>, UpstreamError> {
            Err(UpstreamError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    fn dataset() -> Vec<PlaceRecord> {
        vec![
            PlaceRecord {
                name: "Kathmandu, Bagmati".to_string(),
                postal_code: "44600".to_string(),
                district: "Bagmati".to_string(),
                lat: Some(27.7),
                lon: Some(85.3),
            },
            PlaceRecord {
                name: "Pokhara, Gandaki".to_string(),
                postal_code: "33700".to_string(),
                district: "Gandaki".to_string(),
                lat: None,
                lon: None,
            },
            PlaceRecord {
                name: "Biratnagar, Koshi".to_string(),
                postal_code: "56613".to_string(),
                district: "Koshi".to_string(),
                lat: Some(26.4),
                lon: Some(87.2),
            },
        ]
    }

    fn state_with(
        geocoder: Arc<dyn Geocoder>,
        max_requests: u32,
        limit_autocomplete: bool,
    ) -> Arc<AppState> {
        let policy = RateLimitPolicy {
            max_requests,
            ..RateLimitPolicy::default()
        };
        Arc::new(AppState {
            dataset: Arc::new(DatasetCache::preloaded(dataset())),
            geocoder,
            favorites: Arc::new(MemoryFavorites::new()),
            rate_limiter: Arc::new(RateLimiter::new(policy, Arc::new(MemoryCounterStore::new()))),
            passthrough: PassthroughClient::new(
                reqwest::Client::new(),
                "http://127.0.0.1:9/json",
                "http://127.0.0.1:9/forecast",
            ),
            limit_autocomplete,
        })
    }

    fn app_for(state: &Arc<AppState>, ip: [u8; 4]) -> Router {
        create_router(state.clone()).layer(MockConnectInfo(SocketAddr::from((ip, 40000))))
    }

    fn default_app() -> Router {
        app_for(&state_with(Arc::new(FixedGeocoder), 60, true), [1, 2, 3, 4])
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    // ============================================================
    // SEARCH ROUTES
    // ============================================================

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(&default_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_search_returns_records() {
        let (status, body) = get(&default_app(), "/search?q=kathmandu").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "name": "Kathmandu, Bagmati",
                "postal_code": "44600",
                "district": "Bagmati",
                "lat": 27.7,
                "lon": 85.3
            }])
        );
    }

    #[tokio::test]
    async fn test_search_matches_postal_code_and_paginates() {
        let app = default_app();

        let (_, by_code) = get(&app, "/search?q=337").await;
        assert_eq!(by_code[0]["name"], "Pokhara, Gandaki");

        let (_, page) = get(&app, "/search?q=ar&limit=1&offset=1").await;
        assert_eq!(page.as_array().unwrap().len(), 1);
        assert_eq!(page[0]["name"], "Biratnagar, Koshi");
    }

    #[tokio::test]
    async fn test_search_validation_errors_are_422() {
        let app = default_app();

        for uri in [
            "/search?q=k",
            "/search",
            "/search?q=ka&limit=0",
            "/search?q=ka&limit=51",
            "/search?q=ka&limit=many",
            "/autocomplete?q=ka&limit=21",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
            assert!(body["detail"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_autocomplete_returns_names() {
        let (status, body) = get(&default_app(), "/autocomplete?q=ra").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Pokhara, Gandaki", "Biratnagar, Koshi"]));
    }

    #[tokio::test]
    async fn test_nearby_requires_coordinates() {
        let app = default_app();

        let (status, body) = get(&app, "/nearby?lat=27.7&lon=85.3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"], json!({"lat": 27.7, "lon": 85.3}));
        assert_eq!(body["nearby"].as_array().unwrap().len(), 2);

        let (status, _) = get(&app, "/nearby?lat=27.7").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    // ============================================================
    // RATE LIMITING
    // ============================================================

    #[tokio::test]
    async fn test_rate_limit_returns_429_past_cap() {
        let state = state_with(Arc::new(FixedGeocoder), 2, true);
        let app = app_for(&state, [1, 2, 3, 4]);

        assert_eq!(get(&app, "/search?q=ka").await.0, StatusCode::OK);
        assert_eq!(get(&app, "/autocomplete?q=ka").await.0, StatusCode::OK);

        let (status, body) = get(&app, "/favorites").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({"detail": "Rate limit exceeded. Try again later."}));

        // Ungated routes keep working.
        assert_eq!(get(&app, "/health").await.0, StatusCode::OK);

        // Another caller has its own budget.
        let other = app_for(&state, [5, 6, 7, 8]);
        assert_eq!(get(&other, "/search?q=ka").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_autocomplete_can_be_ungated() {
        let state = state_with(Arc::new(FixedGeocoder), 1, false);
        let app = app_for(&state, [1, 2, 3, 4]);

        for _ in 0..5 {
            assert_eq!(get(&app, "/autocomplete?q=ka").await.0, StatusCode::OK);
        }
        assert_eq!(get(&app, "/search?q=ka").await.0, StatusCode::OK);
        assert_eq!(get(&app, "/search?q=ka").await.0, StatusCode::TOO_MANY_REQUESTS);
    }

    // ============================================================
    // ADVANCED SEARCH
    // ============================================================

    #[tokio::test]
    async fn test_search_advanced_filters_upstream_hits() {
        let (status, body) = get(&default_app(), "/search-advanced?q=pokhara").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "name": "Pokhara, Kaski, Gandaki Province, Nepal",
                "postal_code": "33700",
                "lat": "28.2",
                "lon": "83.9",
                "district": "Kaski"
            }])
        );
    }

    #[tokio::test]
    async fn test_search_advanced_accepts_maximal_offset() {
        let uri = format!("/search-advanced?q=pokhara&offset={}", usize::MAX);
        let (status, body) = get(&default_app(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_search_advanced_upstream_failure_is_503() {
        let app = app_for(&state_with(Arc::new(DownGeocoder), 60, true), [1, 2, 3, 4]);
        let (status, body) = get(&app, "/search-advanced?q=pokhara").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"].as_str().unwrap().contains("Nominatim"));
    }

    // ============================================================
    // FAVORITES
    // ============================================================

    #[tokio::test]
    async fn test_favorites_flow() {
        let state = state_with(Arc::new(FixedGeocoder), 60, true);
        let app = app_for(&state, [1, 2, 3, 4]);
        let favorite = json!({
            "name": "Kathmandu, Bagmati",
            "postal_code": "44600",
            "lat": 27.7,
            "lon": 85.3,
            "district": "Bagmati"
        });

        let (status, body) = send(&app, Method::POST, "/favorites", Some(favorite.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"ok": true, "favorites": [favorite.clone()]}));

        let (status, body) = send(&app, Method::POST, "/favorites", Some(favorite.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["favorites"].as_array().unwrap().len(), 1);

        let (status, body) = get(&app, "/favorites").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([favorite]));

        let other = app_for(&state, [9, 9, 9, 9]);
        assert_eq!(get(&other, "/favorites").await.1, json!([]));

        let (status, body) = send(&app, Method::DELETE, "/favorites/44600", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "favorites": []}));

        let (status, body) = send(&app, Method::DELETE, "/favorites/44600", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "favorites": []}));
    }

    #[tokio::test]
    async fn test_numeric_postal_code_is_stored_as_text() {
        let app = default_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/favorites",
            Some(json!({"postal_code": 44600, "name": "Kathmandu, Bagmati"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["favorites"][0]["postal_code"], "44600");

        let (_, body) = send(
            &app,
            Method::POST,
            "/favorites",
            Some(json!({"postal_code": "44600", "name": "Kathmandu again"})),
        )
        .await;
        assert_eq!(body["favorites"].as_array().unwrap().len(), 1);
        assert_eq!(body["favorites"][0]["name"], "Kathmandu, Bagmati");
    }

    #[tokio::test]
    async fn test_malformed_favorite_body_is_422_json() {
        let app = default_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/favorites")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_favorite_without_fields_is_accepted() {
        let app = default_app();
        let (status, body) = send(&app, Method::POST, "/favorites", Some(json!({}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["favorites"],
            json!([{"name": null, "postal_code": "", "lat": null, "lon": null, "district": null}])
        );
    }
}
