//! Booking domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use little_wonders_core::{BookingId, BookingStatus, Email, SessionType};

/// A photo session booking request (domain type).
///
/// The (`email`, `preferred_date`) pair is unique across all bookings; the
/// database enforces it. `id` and `created_at` are assigned at insert and
/// never change, and bookings are never physically deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking ID.
    pub id: BookingId,
    /// Client's display name.
    pub client_name: String,
    /// Contact phone number (free-form).
    pub phone: String,
    /// Client's email address, normalized to lower case.
    pub email: Email,
    /// Requested session category.
    pub session_type: SessionType,
    /// Requested calendar date.
    pub preferred_date: NaiveDate,
    /// Free-form notes from the client.
    pub notes: String,
    /// Lifecycle state; starts as `pending`.
    pub status: BookingStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a booking.
///
/// Produced by the booking service after field validation; the repository
/// persists it verbatim with `status = pending`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_name: String,
    pub phone: String,
    pub email: Email,
    pub session_type: SessionType,
    pub preferred_date: NaiveDate,
    pub notes: String,
}
