//! Tests for the shared-API-key authentication extractor.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, json_request, response_json};

fn search_body() -> serde_json::Value {
    json!({
        "departure_airport": "KTEB",
        "arrival_airport": "KVNY",
        "departure_date": "2025-06-15",
        "passengers": 4
    })
}

#[tokio::test]
async fn missing_api_key_returns_401() {
    let app = build_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/avainode/aircraft/search")
        .header("content-type", "application/json")
        .body(Body::from(search_body().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Missing X-Api-Key header");
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let app = build_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/avainode/aircraft/search")
        .header("content-type", "application/json")
        .header("x-api-key", "not-the-key")
        .body(Body::from(search_body().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn valid_api_key_reaches_the_handler() {
    let app = build_test_app();

    // The body is deliberately invalid, so a 400 (not 401) proves the
    // request got past authentication and into validation.
    let mut body = search_body();
    body["departure_airport"] = json!("not-a-code");
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/aircraft/search", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
