//! HTTP route handlers for the booking and order API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                       - Liveness check
//! GET  /health/ready                                 - Readiness check (DB ping)
//!
//! # Bookings
//! POST /api/bookings                                 - Create booking
//! GET  /api/bookings                                 - List bookings (newest first)
//! GET  /api/bookings/available-dates                 - Dates holding a live booking
//! GET  /api/bookings/{id}                            - One booking
//!
//! # Digital album orders
//! POST /api/digital-album-orders                     - Create order
//! GET  /api/digital-album-orders                     - List orders (newest first)
//! GET  /api/digital-album-orders/by-booking/{bookingId} - Orders for one booking
//! GET  /api/digital-album-orders/{id}                - One order
//! ```
//!
//! Every response carries the `{success, ...}` envelope; list endpoints add
//! a `count`, failures add a `message` (see [`crate::error::ApiError`]).

pub mod bookings;
pub mod orders;

use axum::{Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope for a single record.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wrap a record in the success envelope.
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope for list endpoints, with a record count.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wrap a collection in the success envelope.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Create the booking routes router.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::index).post(bookings::create))
        .route("/available-dates", get(bookings::available_dates))
        .route("/{id}", get(bookings::show))
}

/// Create the digital album order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/by-booking/{booking_id}", get(orders::by_booking))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/bookings", booking_routes())
        .nest("/api/digital-album-orders", order_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_data_response_shape() {
        let json = serde_json::to_value(DataResponse::new("record")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "record");
    }

    #[test]
    fn test_list_response_counts() {
        let json = serde_json::to_value(ListResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_list_response() {
        let json = serde_json::to_value(ListResponse::<i32>::new(Vec::new())).unwrap();
        assert_eq!(json["count"], 0);
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
