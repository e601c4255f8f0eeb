//! Handlers for the Avainode charter endpoints.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use jetvision_avainode::{
    AircraftSearchResponse, Booking, CharterQuote, CharterSearchParams, CreateBookingParams,
    EmptyLegParams, EmptyLegsResponse, FleetResponse, Operator, PricingParams,
};
use jetvision_core::rate_limit::RateCategory;

use crate::error::{AppError, AppResult};
use crate::handlers::touch_session;
use crate::middleware::auth::ApiKeyAuth;
use crate::response::ApiEnvelope;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a booking.
///
/// Mirrors the client's [`CreateBookingParams`] but carries the gateway's
/// own email check; route, date, and passenger rules are enforced by the
/// client before the request leaves the process.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub quote_id: Option<String>,
    pub aircraft_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: u32,
    pub contact_name: String,
    #[validate(email)]
    pub contact_email: String,
    pub company: Option<String>,
    pub special_requests: Option<String>,
}

impl From<CreateBookingRequest> for CreateBookingParams {
    fn from(input: CreateBookingRequest) -> Self {
        CreateBookingParams {
            quote_id: input.quote_id,
            aircraft_id: input.aircraft_id,
            departure_airport: input.departure_airport,
            arrival_airport: input.arrival_airport,
            departure_date: input.departure_date,
            return_date: input.return_date,
            passengers: input.passengers,
            contact_name: input.contact_name,
            contact_email: input.contact_email,
            company: input.company,
            special_requests: input.special_requests,
        }
    }
}

/// Request body for cancelling a booking.
#[derive(Debug, Deserialize)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /avainode/aircraft/search
///
/// Search for available charter aircraft on a route.
pub async fn search_aircraft(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<CharterSearchParams>,
) -> AppResult<Json<ApiEnvelope<AircraftSearchResponse>>> {
    touch_session(&state, &headers, "avainode:aircraft_search").await;

    let data = state.avainode.search_aircraft(&params).await?;
    let usage = state
        .limiter
        .usage("avainode:aircraft_search", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// POST /avainode/pricing
///
/// Generate a pricing quote for an aircraft on a route.
pub async fn get_pricing(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<PricingParams>,
) -> AppResult<Json<ApiEnvelope<CharterQuote>>> {
    touch_session(&state, &headers, "avainode:pricing").await;

    let data = state.avainode.get_pricing(&params).await?;
    let usage = state.limiter.usage("avainode:pricing", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// POST /avainode/bookings
///
/// Create a charter booking.
pub async fn create_booking(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiEnvelope<Booking>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    touch_session(&state, &headers, "avainode:booking_create").await;

    let params: CreateBookingParams = input.into();
    let data = state.avainode.create_booking(&params).await?;
    let usage = state
        .limiter
        .usage("avainode:booking_create", RateCategory::Charter);
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(data, usage, "avainode", &headers)),
    ))
}

/// GET /avainode/bookings/{id}
///
/// Fetch a booking by id.
pub async fn get_booking(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Path(booking_id): Path<String>,
) -> AppResult<Json<ApiEnvelope<Booking>>> {
    touch_session(&state, &headers, "avainode:booking_get").await;

    let data = state.avainode.get_booking(&booking_id).await?;
    let usage = state
        .limiter
        .usage("avainode:booking_get", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// POST /avainode/bookings/{id}/cancel
///
/// Cancel a booking, optionally with a reason.
pub async fn cancel_booking(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Path(booking_id): Path<String>,
    Json(input): Json<CancelBookingRequest>,
) -> AppResult<Json<ApiEnvelope<Booking>>> {
    touch_session(&state, &headers, "avainode:booking_cancel").await;

    let data = state
        .avainode
        .cancel_booking(&booking_id, input.reason.as_deref())
        .await?;
    let usage = state
        .limiter
        .usage("avainode:booking_cancel", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// GET /avainode/fleet
///
/// List the operator fleet with utilization figures.
pub async fn list_fleet(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
) -> AppResult<Json<ApiEnvelope<FleetResponse>>> {
    touch_session(&state, &headers, "avainode:fleet").await;

    let data = state.avainode.list_fleet().await?;
    let usage = state.limiter.usage("avainode:fleet", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// GET /avainode/operators/{id}
///
/// Fetch a charter operator profile.
pub async fn get_operator(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Path(operator_id): Path<String>,
) -> AppResult<Json<ApiEnvelope<Operator>>> {
    touch_session(&state, &headers, "avainode:operator").await;

    let data = state.avainode.get_operator(&operator_id).await?;
    let usage = state.limiter.usage("avainode:operator", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}

/// GET /avainode/empty-legs
///
/// List discounted repositioning flights, with optional route/date filters.
pub async fn list_empty_legs(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Query(params): Query<EmptyLegParams>,
) -> AppResult<Json<ApiEnvelope<EmptyLegsResponse>>> {
    touch_session(&state, &headers, "avainode:empty_legs").await;

    let data = state.avainode.list_empty_legs(&params).await?;
    let usage = state
        .limiter
        .usage("avainode:empty_legs", RateCategory::Charter);
    Ok(Json(ApiEnvelope::new(data, usage, "avainode", &headers)))
}
