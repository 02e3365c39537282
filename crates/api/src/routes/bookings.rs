//! Booking route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::error::Result;
use crate::models::booking::Booking;
use crate::routes::{DataResponse, ListResponse};
use crate::services::bookings::{BookingService, CreateBooking};
use crate::state::AppState;

/// Create a booking.
///
/// POST /api/bookings
///
/// On success the client gets the persisted record back and a
/// booking-received email is queued (fire-and-forget).
///
/// # Errors
///
/// Returns 400 for validation failures, past dates, and duplicate
/// (email, date) pairs.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> Result<(StatusCode, Json<DataResponse<Booking>>)> {
    let booking = BookingService::new(state.pool()).create(input).await?;

    tracing::info!(booking_id = %booking.id, date = %booking.preferred_date, "Booking created");

    if let Some(email) = state.email() {
        email.queue_booking_received(&booking);
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(booking))))
}

/// List every booking, newest first.
///
/// GET /api/bookings
///
/// # Errors
///
/// Returns 500 if the query fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<ListResponse<Booking>>> {
    let bookings = BookingService::new(state.pool()).list_all().await?;
    Ok(Json(ListResponse::new(bookings)))
}

/// Get a single booking.
///
/// GET /api/bookings/{id}
///
/// # Errors
///
/// Returns 400 for a syntactically invalid identifier and 404 when no
/// booking matches.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Booking>>> {
    let booking = BookingService::new(state.pool()).get(&id).await?;
    Ok(Json(DataResponse::new(booking)))
}

/// Dates that currently hold at least one non-cancelled booking.
///
/// GET /api/bookings/available-dates
///
/// The front-end greys these out in its date picker; the remaining dates
/// are free.
///
/// # Errors
///
/// Returns 500 if the query fails.
#[instrument(skip(state))]
pub async fn available_dates(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<String>>>> {
    let dates = BookingService::new(state.pool()).booked_dates().await?;
    Ok(Json(DataResponse::new(dates)))
}
