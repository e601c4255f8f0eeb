//! Route definitions for the Apollo.io lead and CRM endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::apollo;
use crate::state::AppState;

/// Routes mounted at `/apollo`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads/search", post(apollo::search_leads))
        .route("/organizations/search", post(apollo::search_organizations))
        .route("/contacts/enrich", post(apollo::enrich_contact))
        .route("/contacts/enrich/bulk", post(apollo::bulk_enrich_contacts))
        .route("/contacts", post(apollo::create_contact))
        .route("/contacts/{id}", put(apollo::update_contact))
        .route(
            "/sequences/{id}/contacts",
            post(apollo::add_contacts_to_sequence),
        )
        .route("/deals", post(apollo::create_deal).get(apollo::list_deals))
        .route("/health", get(apollo::vendor_health))
}
