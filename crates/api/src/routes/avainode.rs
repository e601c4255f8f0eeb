//! Route definitions for the Avainode charter endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::avainode;
use crate::state::AppState;

/// Routes mounted at `/avainode`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aircraft/search", post(avainode::search_aircraft))
        .route("/pricing", post(avainode::get_pricing))
        .route("/bookings", post(avainode::create_booking))
        .route("/bookings/{id}", get(avainode::get_booking))
        .route("/bookings/{id}/cancel", post(avainode::cancel_booking))
        .route("/fleet", get(avainode::list_fleet))
        .route("/empty-legs", get(avainode::list_empty_legs))
        .route("/operators/{id}", get(avainode::get_operator))
}
