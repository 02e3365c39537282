//! Database operations for the studio `PostgreSQL` schema.
//!
//! # Database: `studio`
//!
//! ## Tables
//!
//! - `studio.booking` - Photo session booking requests
//! - `studio.digital_album_order` - Digital album purchases, one booking each
//!
//! Both uniqueness invariants live here as unique indexes: a booking's
//! (`email`, `preferred_date`) pair and an order's (`booking_id`,
//! `customer_email`) pair. Repositories translate unique violations into
//! [`RepositoryError::Conflict`]; the service layer never pre-checks
//! existence, so racing creates resolve atomically in the database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p little-wonders-cli -- migrate
//! ```

pub mod bookings;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate booking for an email and date).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
