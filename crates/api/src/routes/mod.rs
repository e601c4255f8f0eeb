pub mod apollo;
pub mod avainode;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /avainode/aircraft/search          POST  aircraft search
/// /avainode/pricing                  POST  pricing quote
/// /avainode/bookings                 POST  create booking
/// /avainode/bookings/{id}            GET   fetch booking
/// /avainode/bookings/{id}/cancel     POST  cancel booking
/// /avainode/fleet                    GET   fleet + utilization
/// /avainode/empty-legs               GET   empty-leg listing
/// /avainode/operators/{id}           GET   operator profile
///
/// /apollo/leads/search               POST  people search
/// /apollo/organizations/search       POST  organization search
/// /apollo/contacts/enrich            POST  single enrichment
/// /apollo/contacts/enrich/bulk       POST  bulk enrichment
/// /apollo/contacts                   POST  create contact
/// /apollo/contacts/{id}              PUT   update contact
/// /apollo/sequences/{id}/contacts    POST  add contacts to sequence
/// /apollo/deals                      POST, GET  create / list deals
/// /apollo/health                     GET   upstream credential check
/// ```
///
/// Every route requires the `X-Api-Key` header (enforced by handler
/// extractors). `/health` lives at the root level, outside this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/avainode", avainode::router())
        .nest("/apollo", apollo::router())
}
