//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that maps the domain failure taxonomy
//! to an HTTP status plus the JSON failure envelope, capturing server-side
//! errors to Sentry before responding. All route handlers return
//! `Result<T, ApiError>`; no error propagates past this boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more input fields are missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The requested booking date is earlier than today.
    #[error("Cannot book a date in the past")]
    DateInPast,

    /// A booking already exists for this (email, date) pair.
    #[error("A booking already exists for this email on this date")]
    DuplicateBooking,

    /// An order already exists for this (booking, email) pair.
    #[error("You've already ordered an album for this booking. Check your email for details.")]
    DuplicateOrder,

    /// The booking referenced by an order does not exist.
    #[error("Booking not found. Please check your booking ID.")]
    BookingNotFound,

    /// The referenced booking has not been confirmed yet.
    #[error("This booking is not confirmed yet. Please wait for confirmation.")]
    BookingNotConfirmed,

    /// The order's customer email does not match the booking's email.
    #[error("Email doesn't match booking. Please use the email you booked with.")]
    EmailMismatch,

    /// Resource lookup miss.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A path identifier is not syntactically valid.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON failure envelope: `{"success": false, "message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::DateInPast
            | Self::DuplicateBooking
            | Self::BookingNotConfirmed
            | Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::EmailMismatch => StatusCode::FORBIDDEN,
            Self::BookingNotFound | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateOrder => StatusCode::CONFLICT,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Repository(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status_code();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Repository(_) | Self::Internal(_) => {
                "Server error. Please try again later.".to_owned()
            }
            _ => self.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
