//! Booking operator commands.
//!
//! Booking status transitions are an administrative action with no HTTP
//! surface: the studio confirms or cancels a booking here, out of band.
//! No transition validation is performed; any status value is accepted.
//!
//! # Usage
//!
//! ```bash
//! lw-cli booking confirm -i <booking-id>
//! lw-cli booking cancel -i <booking-id>
//! ```
//!
//! # Environment Variables
//!
//! - `STUDIO_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use little_wonders_api::db::RepositoryError;
use little_wonders_api::db::bookings::BookingRepository;
use little_wonders_core::{BookingId, BookingStatus};

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The supplied identifier is not a UUID.
    #[error("Invalid booking id: {0}")]
    InvalidId(String),

    /// No booking matches the identifier.
    #[error("Booking not found: {0}")]
    NotFound(String),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// Set a booking's status.
///
/// # Errors
///
/// Returns `BookingCommandError` if the identifier is malformed, the booking
/// does not exist, or the database is unreachable.
pub async fn set_status(id: &str, status: BookingStatus) -> Result<(), BookingCommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STUDIO_DATABASE_URL")
        .map_err(|_| BookingCommandError::MissingEnvVar("STUDIO_DATABASE_URL"))?;

    let booking_id: BookingId = id
        .parse()
        .map_err(|_| BookingCommandError::InvalidId(id.to_owned()))?;

    tracing::info!("Connecting to studio database...");
    let pool = PgPool::connect(&database_url).await?;

    let bookings = BookingRepository::new(&pool);
    let booking = bookings
        .update_status(booking_id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => BookingCommandError::NotFound(id.to_owned()),
            other => BookingCommandError::Repository(other),
        })?;

    tracing::info!(
        "Booking {} ({} on {}) is now {}",
        booking.id,
        booking.email,
        booking.preferred_date,
        booking.status
    );
    Ok(())
}
