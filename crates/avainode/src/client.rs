//! HTTP client for the Avainode charter marketplace.
//!
//! Every operation follows the same path: validate parameters locally,
//! acquire a slot from the sliding-window limiter, issue the request
//! through the bounded 429 retry loop, classify the response by status
//! code, and deserialize. Read operations go through the response cache
//! when one is attached; mutations never do.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use jetvision_cache::ResponseCache;
use jetvision_core::error::CoreError;
use jetvision_core::rate_limit::{RateCategory, RateLimiter};
use jetvision_core::retry::{parse_retry_after, RetryPolicy};
use jetvision_core::validation::{
    validate_airport_code, validate_date, validate_date_range, validate_passenger_count,
    validate_required_text,
};

use crate::error::AvainodeError;
use crate::types::{
    AircraftSearchResponse, Booking, CharterQuote, CharterSearchParams, CreateBookingParams,
    EmptyLegParams, EmptyLegsResponse, FleetResponse, Operator, PricingParams,
};

/// Production Avainode API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.avinode.com/v1";

/// Fallback `Retry-After` when Avainode sends a 429 without the header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for [`AvainodeClient`].
#[derive(Debug, Clone)]
pub struct AvainodeConfig {
    /// API base URL (override for staging or tests).
    pub base_url: String,
    /// Bearer token for the `Authorization` header.
    pub api_key: String,
    /// 429 retry policy.
    pub retry: RetryPolicy,
}

impl AvainodeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the Avainode charter API.
///
/// All operations draw from the `Charter` rate category (100/min). The
/// limiter is shared with the rest of the gateway so API handlers can
/// report usage for the same windows the client consumes.
pub struct AvainodeClient {
    http: reqwest::Client,
    config: AvainodeConfig,
    limiter: Arc<RateLimiter>,
    cache: Option<ResponseCache>,
}

impl AvainodeClient {
    pub fn new(config: AvainodeConfig, limiter: Arc<RateLimiter>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            limiter,
            cache: None,
        }
    }

    /// Attach a read-through response cache for search/GET operations.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    // ---- operations ----

    /// Search for available charter aircraft on a route.
    pub async fn search_aircraft(
        &self,
        params: &CharterSearchParams,
    ) -> Result<AircraftSearchResponse, AvainodeError> {
        validate_airport_code(&params.departure_airport)?;
        validate_airport_code(&params.arrival_airport)?;
        validate_date_range(&params.departure_date, params.return_date.as_deref())?;
        validate_passenger_count(params.passengers)?;

        self.cached("aircraft_search", &params_value(params)?, || async {
            let response = self
                .execute("aircraft_search", || {
                    self.http
                        .post(format!("{}/aircraft/search", self.config.base_url))
                        .bearer_auth(&self.config.api_key)
                        .json(params)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Generate a pricing quote for an aircraft on a route.
    pub async fn get_pricing(&self, params: &PricingParams) -> Result<CharterQuote, AvainodeError> {
        validate_required_text("aircraft_id", &params.aircraft_id)?;
        validate_airport_code(&params.departure_airport)?;
        validate_airport_code(&params.arrival_airport)?;
        validate_date_range(&params.departure_date, params.return_date.as_deref())?;
        validate_passenger_count(params.passengers)?;

        let response = self
            .execute("pricing", || {
                self.http
                    .post(format!("{}/pricing/quotes", self.config.base_url))
                    .bearer_auth(&self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Create a charter booking.
    pub async fn create_booking(
        &self,
        params: &CreateBookingParams,
    ) -> Result<Booking, AvainodeError> {
        validate_required_text("aircraft_id", &params.aircraft_id)?;
        validate_airport_code(&params.departure_airport)?;
        validate_airport_code(&params.arrival_airport)?;
        validate_date_range(&params.departure_date, params.return_date.as_deref())?;
        validate_passenger_count(params.passengers)?;
        validate_required_text("contact_name", &params.contact_name)?;
        validate_required_text("contact_email", &params.contact_email)?;

        let response = self
            .execute("booking_create", || {
                self.http
                    .post(format!("{}/bookings", self.config.base_url))
                    .bearer_auth(&self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Fetch a booking by id.
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, AvainodeError> {
        validate_required_text("booking_id", booking_id)?;

        self.cached("booking", &json!({ "id": booking_id }), || async {
            let response = self
                .execute("booking_get", || {
                    self.http
                        .get(format!("{}/bookings/{booking_id}", self.config.base_url))
                        .bearer_auth(&self.config.api_key)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Cancel a booking, optionally with a reason.
    ///
    /// Drops the cached copy of the booking so a follow-up fetch sees the
    /// cancelled state instead of the pre-cancellation entry.
    pub async fn cancel_booking(
        &self,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<Booking, AvainodeError> {
        validate_required_text("booking_id", booking_id)?;

        let response = self
            .execute("booking_cancel", || {
                self.http
                    .post(format!(
                        "{}/bookings/{booking_id}/cancel",
                        self.config.base_url
                    ))
                    .bearer_auth(&self.config.api_key)
                    .json(&json!({ "reason": reason }))
            })
            .await?;
        let booking: Booking = parse_json(response).await?;

        if let Some(cache) = &self.cache {
            let key = ResponseCache::cache_key("avainode", "booking", &json!({ "id": booking_id }));
            cache.invalidate(&key).await;
        }

        Ok(booking)
    }

    /// List the operator fleet with utilization figures.
    pub async fn list_fleet(&self) -> Result<FleetResponse, AvainodeError> {
        self.cached("fleet", &json!({}), || async {
            let response = self
                .execute("fleet", || {
                    self.http
                        .get(format!("{}/fleet", self.config.base_url))
                        .bearer_auth(&self.config.api_key)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// List discounted repositioning (empty-leg) flights.
    pub async fn list_empty_legs(
        &self,
        params: &EmptyLegParams,
    ) -> Result<EmptyLegsResponse, AvainodeError> {
        if let Some(code) = &params.departure_airport {
            validate_airport_code(code)?;
        }
        if let Some(code) = &params.arrival_airport {
            validate_airport_code(code)?;
        }
        if let Some(date) = &params.date_from {
            validate_date(date)?;
        }
        if let Some(date) = &params.date_to {
            validate_date(date)?;
        }

        self.cached("empty_legs", &params_value(params)?, || async {
            let response = self
                .execute("empty_legs", || {
                    self.http
                        .get(format!("{}/emptylegs", self.config.base_url))
                        .bearer_auth(&self.config.api_key)
                        .query(params)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Fetch an operator profile by id.
    pub async fn get_operator(&self, operator_id: &str) -> Result<Operator, AvainodeError> {
        validate_required_text("operator_id", operator_id)?;

        self.cached("operator", &json!({ "id": operator_id }), || async {
            let response = self
                .execute("operator", || {
                    self.http
                        .get(format!("{}/operators/{operator_id}", self.config.base_url))
                        .bearer_auth(&self.config.api_key)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    // ---- private helpers ----

    /// Run `fetch` through the response cache when one is attached.
    async fn cached<T, F, Fut>(
        &self,
        endpoint: &'static str,
        params: &serde_json::Value,
        fetch: F,
    ) -> Result<T, AvainodeError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AvainodeError>>,
    {
        match &self.cache {
            Some(cache) => {
                let key = ResponseCache::cache_key("avainode", endpoint, params);
                cache.get_or_fetch(&key, fetch).await
            }
            None => fetch().await,
        }
    }

    /// Acquire a limiter slot and send the request, retrying bounded times
    /// on 429. Returns the classified response.
    async fn execute(
        &self,
        endpoint: &'static str,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AvainodeError> {
        let policy = &self.config.retry;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.limiter
                .try_acquire(&format!("avainode:{endpoint}"), RateCategory::Charter)?;

            tracing::debug!(endpoint, attempt, "Sending Avainode request");
            let response = build().send().await?;
            let status = response.status();

            if status.as_u16() == 429 && attempt < policy.max_attempts {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                let delay = policy.delay_for(attempt, retry_after);
                tracing::warn!(
                    endpoint,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Avainode returned 429, backing off",
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return classify(endpoint, response).await;
        }
    }
}

/// Map a response to a typed error, or pass it through on success.
async fn classify(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AvainodeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .map(|d| d.as_secs())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            tracing::warn!(endpoint, retry_after_secs, "Avainode rate limit exhausted");
            Err(AvainodeError::RateLimited { retry_after_secs })
        }
        401 | 403 => {
            tracing::error!(endpoint, status = status.as_u16(), "Avainode auth failure");
            Err(AvainodeError::Auth {
                status: status.as_u16(),
            })
        }
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(endpoint, status = status.as_u16(), "Avainode API error");
            Err(AvainodeError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Parse a successful JSON response body into the expected type.
async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AvainodeError> {
    Ok(response.json::<T>().await?)
}

/// Serialize request parameters for cache key fingerprinting.
fn params_value<T: Serialize>(params: &T) -> Result<serde_json::Value, AvainodeError> {
    serde_json::to_value(params)
        .map_err(|e| AvainodeError::Core(CoreError::Internal(e.to_string())))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
