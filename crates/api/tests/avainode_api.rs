//! Tests for the Avainode route handlers: validation rejections, upstream
//! failure mapping, and the local rate-limit ceiling.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{bare_request, build_test_app, json_request, response_json};

fn search_body() -> serde_json::Value {
    json!({
        "departure_airport": "KTEB",
        "arrival_airport": "KVNY",
        "departure_date": "2025-06-15",
        "passengers": 4
    })
}

fn booking_body() -> serde_json::Value {
    json!({
        "aircraft_id": "ac-100",
        "departure_airport": "KTEB",
        "arrival_airport": "KVNY",
        "departure_date": "2025-06-15",
        "passengers": 4,
        "contact_name": "Ava Chen",
        "contact_email": "ava@example.com"
    })
}

// ---------------------------------------------------------------------------
// Validation rejections (no upstream call is made)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_rejects_invalid_airport_code() {
    let app = build_test_app();

    let mut body = search_body();
    body["arrival_airport"] = json!("vny");
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/aircraft/search", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn search_rejects_return_before_departure() {
    let app = build_test_app();

    let mut body = search_body();
    body["return_date"] = json!("2025-06-01");
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/aircraft/search", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn search_rejects_too_many_passengers() {
    let app = build_test_app();

    let mut body = search_body();
    body["passengers"] = json!(20);
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/aircraft/search", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_rejects_malformed_email() {
    let app = build_test_app();

    let mut body = booking_body();
    body["contact_email"] = json!("not-an-email");
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/bookings", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn booking_rejects_blank_contact_name() {
    let app = build_test_app();

    let mut body = booking_body();
    body["contact_name"] = json!("   ");
    let response = app
        .oneshot(json_request("POST", "/api/v1/avainode/bookings", body))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_legs_rejects_bad_date_filter() {
    let app = build_test_app();

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/v1/avainode/empty-legs?date_from=June%201",
        ))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Upstream failure mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_vendor_maps_to_502() {
    let app = build_test_app();

    let response = app
        .oneshot(bare_request("GET", "/api/v1/avainode/fleet"))
        .await
        .unwrap();

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UPSTREAM_UNREACHABLE");
    // The error is sanitized, not the raw transport error.
    assert_eq!(json["error"], "Avainode could not be reached");
}

// ---------------------------------------------------------------------------
// Local rate limit ceiling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn charter_window_rejects_the_101st_call() {
    let app = build_test_app();

    // The charter category admits 100 calls per minute per endpoint. Every
    // call here fails upstream (vendor unreachable) but still consumes a
    // window slot, because admission happens before the request is sent.
    for _ in 0..100 {
        let response = app
            .clone()
            .oneshot(bare_request("GET", "/api/v1/avainode/fleet"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    let response = app
        .oneshot(bare_request("GET", "/api/v1/avainode/fleet"))
        .await
        .unwrap();

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "RATE_LIMITED");
    assert!(retry_after.is_some(), "429 must carry a Retry-After header");
}
