use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;

use jetvision_api::config::ServerConfig;
use jetvision_api::router::build_app_router;
use jetvision_api::state::AppState;
use jetvision_apollo::{ApolloClient, ApolloConfig};
use jetvision_avainode::{AvainodeClient, AvainodeConfig};
use jetvision_cache::{MemoryStore, ResponseCache, SessionStore, StoreBackend};
use jetvision_core::api_keys::hash_gateway_key;
use jetvision_core::rate_limit::RateLimiter;
use jetvision_core::retry::RetryPolicy;

/// Gateway key accepted by the test app.
pub const TEST_GATEWAY_KEY: &str = "test-gateway-key";

/// Vendor base URL that refuses connections immediately, so upstream
/// failures surface fast instead of hanging tests.
pub const UNREACHABLE_VENDOR: &str = "http://127.0.0.1:1";

/// Build a test `ServerConfig` with safe defaults and unreachable vendors.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        gateway_key_digest: hash_gateway_key(TEST_GATEWAY_KEY),
        apollo_api_key: "apollo-test-key".to_string(),
        apollo_base_url: Some(UNREACHABLE_VENDOR.to_string()),
        avainode_api_key: "avainode-test-key".to_string(),
        avainode_base_url: Some(UNREACHABLE_VENDOR.to_string()),
        redis_url: None,
        vendor_retry: RetryPolicy::default(),
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the construction in `main.rs` (memory store, shared limiter,
/// cached clients) so integration tests exercise the same stack that
/// production uses.
pub fn build_test_app() -> Router {
    let config = test_config();

    let store = Arc::new(StoreBackend::Memory(MemoryStore::new()));
    let response_cache = ResponseCache::new(Arc::clone(&store));
    let sessions = SessionStore::new(Arc::clone(&store));
    let limiter = Arc::new(RateLimiter::new());

    let apollo_config = ApolloConfig {
        base_url: config.apollo_base_url.clone().unwrap(),
        api_key: config.apollo_api_key.clone(),
        retry: config.vendor_retry.clone(),
    };
    let apollo = Arc::new(
        ApolloClient::new(apollo_config, Arc::clone(&limiter)).with_cache(response_cache.clone()),
    );

    let avainode_config = AvainodeConfig {
        base_url: config.avainode_base_url.clone().unwrap(),
        api_key: config.avainode_api_key.clone(),
        retry: config.vendor_retry.clone(),
    };
    let avainode = Arc::new(
        AvainodeClient::new(avainode_config, Arc::clone(&limiter))
            .with_cache(response_cache.clone()),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        apollo,
        avainode,
        limiter,
        sessions,
    };

    build_app_router(state, &config)
}

/// Build an authenticated JSON request against the test app.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", TEST_GATEWAY_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build an authenticated bodyless request against the test app.
pub fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", TEST_GATEWAY_KEY)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response into its status code and parsed JSON body.
pub async fn response_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}
