use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST   /              -> create_booking
/// GET    /              -> list_bookings
/// GET    /{id}          -> get_booking
/// PATCH  /{id}/status   -> update_booking_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route("/{id}", get(booking::get_booking))
        .route("/{id}/status", patch(booking::update_booking_status))
}
