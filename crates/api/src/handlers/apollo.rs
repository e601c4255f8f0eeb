//! Handlers for the Apollo.io lead and CRM endpoints.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use jetvision_apollo::{
    ApolloHealth, BulkEnrichParams, BulkMatchResponse, Contact, CreateContactParams,
    CreateDealParams, Deal, DealsResponse, EnrichPersonParams, ListDealsParams, MatchResponse,
    OrganizationSearchParams, OrganizationSearchResponse, PeopleSearchParams,
    PeopleSearchResponse, SequenceAddParams, SequenceAddResult,
};
use jetvision_core::rate_limit::RateCategory;

use crate::error::AppResult;
use crate::handlers::touch_session;
use crate::middleware::auth::ApiKeyAuth;
use crate::response::ApiEnvelope;
use crate::state::AppState;

/// POST /apollo/leads/search
///
/// Search for people matching lead criteria.
pub async fn search_leads(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<PeopleSearchParams>,
) -> AppResult<Json<ApiEnvelope<PeopleSearchResponse>>> {
    touch_session(&state, &headers, "apollo:people_search").await;

    let data = state.apollo.search_people(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:people_search", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/organizations/search
///
/// Search for organizations (accounts).
pub async fn search_organizations(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<OrganizationSearchParams>,
) -> AppResult<Json<ApiEnvelope<OrganizationSearchResponse>>> {
    touch_session(&state, &headers, "apollo:organization_search").await;

    let data = state.apollo.search_organizations(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:organization_search", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/contacts/enrich
///
/// Enrich a single contact from match signals.
pub async fn enrich_contact(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<EnrichPersonParams>,
) -> AppResult<Json<ApiEnvelope<MatchResponse>>> {
    touch_session(&state, &headers, "apollo:people_match").await;

    let data = state.apollo.enrich_person(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:people_match", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/contacts/enrich/bulk
///
/// Enrich a batch of contacts in one upstream call.
pub async fn bulk_enrich_contacts(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<BulkEnrichParams>,
) -> AppResult<Json<ApiEnvelope<BulkMatchResponse>>> {
    touch_session(&state, &headers, "apollo:bulk_match").await;

    let data = state.apollo.bulk_enrich_people(&params).await?;
    let usage = state.limiter.usage("apollo:bulk_match", RateCategory::Bulk);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/contacts
///
/// Create a CRM contact.
pub async fn create_contact(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<CreateContactParams>,
) -> AppResult<(StatusCode, Json<ApiEnvelope<Contact>>)> {
    touch_session(&state, &headers, "apollo:contact_create").await;

    let data = state.apollo.create_contact(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:contact_create", RateCategory::Standard);
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(data, usage, "apollo", &headers)),
    ))
}

/// PUT /apollo/contacts/{id}
///
/// Update an existing CRM contact.
pub async fn update_contact(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Path(contact_id): Path<String>,
    Json(params): Json<CreateContactParams>,
) -> AppResult<Json<ApiEnvelope<Contact>>> {
    touch_session(&state, &headers, "apollo:contact_update").await;

    let data = state.apollo.update_contact(&contact_id, &params).await?;
    let usage = state
        .limiter
        .usage("apollo:contact_update", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/sequences/{id}/contacts
///
/// Add contacts to an email sequence.
pub async fn add_contacts_to_sequence(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Path(sequence_id): Path<String>,
    Json(params): Json<SequenceAddParams>,
) -> AppResult<Json<ApiEnvelope<SequenceAddResult>>> {
    touch_session(&state, &headers, "apollo:sequence_add").await;

    let data = state
        .apollo
        .add_contacts_to_sequence(&sequence_id, &params)
        .await?;
    let usage = state.limiter.usage("apollo:sequence_add", RateCategory::Bulk);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// POST /apollo/deals
///
/// Create a deal (opportunity).
pub async fn create_deal(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Json(params): Json<CreateDealParams>,
) -> AppResult<(StatusCode, Json<ApiEnvelope<Deal>>)> {
    touch_session(&state, &headers, "apollo:deal_create").await;

    let data = state.apollo.create_deal(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:deal_create", RateCategory::Standard);
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(data, usage, "apollo", &headers)),
    ))
}

/// GET /apollo/health
///
/// Check that the configured Apollo key is accepted upstream. Unlike the
/// root `/health` liveness probe, this burns a vendor call, so it sits
/// behind gateway auth.
pub async fn vendor_health(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
) -> AppResult<Json<ApiEnvelope<ApolloHealth>>> {
    touch_session(&state, &headers, "apollo:health").await;

    let data = state.apollo.health_check().await?;
    let usage = state.limiter.usage("apollo:health", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}

/// GET /apollo/deals
///
/// List deals, paged.
pub async fn list_deals(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    headers: HeaderMap,
    Query(params): Query<ListDealsParams>,
) -> AppResult<Json<ApiEnvelope<DealsResponse>>> {
    touch_session(&state, &headers, "apollo:deals_list").await;

    let data = state.apollo.list_deals(&params).await?;
    let usage = state
        .limiter
        .usage("apollo:deals_list", RateCategory::Standard);
    Ok(Json(ApiEnvelope::new(data, usage, "apollo", &headers)))
}
