//! Handlers for the `/bookings` resource.

use ascend_core::error::CoreError;
use ascend_db::models::booking::Booking;
use ascend_db::BookingStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::booking::{BookingOutcome, CreateBookingInput};
use crate::error::AppResult;
use crate::state::AppState;

/// Body for `PATCH /api/bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// POST /api/bookings
///
/// Returns 201 even when the gateway could not raise an order; the body's
/// `nextStep` tells the client what to show.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBookingInput>,
) -> AppResult<(StatusCode, Json<BookingOutcome>)> {
    let outcome = state.bookings.create_booking(input).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/bookings
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Json<Vec<Booking>>> {
    Ok(Json(state.store.list_bookings().await?))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .store
        .find_booking(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Booking", id))?;
    Ok(Json(booking))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<Booking>> {
    let booking = state.bookings.update_status(&id, &body.status).await?;
    Ok(Json(booking))
}
