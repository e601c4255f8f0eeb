//! Shared response envelope types for API handlers.
//!
//! All success responses use the `{ "success": true, "data": ..., "usage":
//! ..., "metadata": ... }` envelope. Use [`ApiEnvelope`] instead of ad-hoc
//! `serde_json::json!` so handlers get compile-time type safety and a
//! consistent shape.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

use jetvision_core::rate_limit::RateUsage;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    pub data: T,
    /// Rate-limit window snapshot for the endpoint that served this request.
    pub usage: RateUsage,
    pub metadata: ResponseMetadata,
}

/// Per-response metadata block.
#[derive(Debug, Serialize)]
pub struct ResponseMetadata {
    /// Request id set by the middleware stack, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Which vendor served the data (`"apollo"` or `"avainode"`).
    pub vendor: &'static str,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Wrap `data` with usage and metadata pulled from the request headers.
    pub fn new(data: T, usage: RateUsage, vendor: &'static str, headers: &HeaderMap) -> Self {
        let request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            success: true,
            data,
            usage,
            metadata: ResponseMetadata {
                request_id,
                timestamp: Utc::now(),
                vendor,
            },
        }
    }
}
