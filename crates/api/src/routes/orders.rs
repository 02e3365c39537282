//! Digital album order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::error::Result;
use crate::models::order::OrderWithBooking;
use crate::routes::{DataResponse, ListResponse};
use crate::services::orders::{CreateOrder, OrderService};
use crate::state::AppState;

/// Create a digital album order.
///
/// POST /api/digital-album-orders
///
/// The referenced booking must exist, be confirmed, and carry the same
/// email the customer orders with. On success the response joins the
/// booking in and an order-received email is queued (fire-and-forget).
///
/// # Errors
///
/// Returns 404 when the booking does not resolve, 400 when it is not
/// confirmed or a field is invalid, 403 on an email mismatch, and 409 when
/// the (booking, email) pair already has an order.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> Result<(StatusCode, Json<DataResponse<OrderWithBooking>>)> {
    let order = OrderService::new(state.pool()).create(input).await?;

    tracing::info!(order_id = %order.order.id, booking_id = %order.order.booking_id, "Order created");

    if let Some(email) = state.email() {
        email.queue_order_received(&order.order);
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(order))))
}

/// List every order, newest first, each joined with its booking.
///
/// GET /api/digital-album-orders
///
/// # Errors
///
/// Returns 500 if a query fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<OrderWithBooking>>> {
    let orders = OrderService::new(state.pool()).list_all().await?;
    Ok(Json(ListResponse::new(orders)))
}

/// Get a single order joined with its booking.
///
/// GET /api/digital-album-orders/{id}
///
/// # Errors
///
/// Returns 404 when no order matches.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<OrderWithBooking>>> {
    let order = OrderService::new(state.pool()).get(&id).await?;
    Ok(Json(DataResponse::new(order)))
}

/// List the orders referencing one booking, newest first.
///
/// GET /api/digital-album-orders/by-booking/{bookingId}
///
/// An empty collection is a success, not an error.
///
/// # Errors
///
/// Returns 500 if a query fails.
#[instrument(skip(state))]
pub async fn by_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ListResponse<OrderWithBooking>>> {
    let orders = OrderService::new(state.pool())
        .list_by_booking(&booking_id)
        .await?;
    Ok(Json(ListResponse::new(orders)))
}
