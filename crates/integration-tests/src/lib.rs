//! Integration test helpers for Little Wonders.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the API
//! cargo run -p little-wonders-cli -- migrate
//! cargo run -p little-wonders-api
//!
//! # Run integration tests (ignored by default)
//! cargo test -p little-wonders-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STUDIO_API_BASE_URL` - API base URL (default: `http://localhost:4000`)
//! - `STUDIO_DATABASE_URL` - `PostgreSQL` connection string, used to perform
//!   the administrative status flips the HTTP surface deliberately lacks

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use chrono::{Days, Utc};
use reqwest::Client;
use sqlx::PgPool;
use uuid::Uuid;

use little_wonders_core::BookingStatus;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("STUDIO_API_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// Create an HTTP client for the tests.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// Connect to the test database for administrative status flips.
///
/// # Panics
///
/// Panics if `STUDIO_DATABASE_URL` is unset or the connection fails.
pub async fn test_pool() -> PgPool {
    let database_url =
        std::env::var("STUDIO_DATABASE_URL").expect("STUDIO_DATABASE_URL must be set");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// A unique email address for test isolation.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

/// An ISO date `days` from today.
///
/// # Panics
///
/// Panics on calendar overflow (never for reasonable offsets).
#[must_use]
pub fn future_date(days: u64) -> String {
    let date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date overflow");
    date.format("%Y-%m-%d").to_string()
}

/// Create a booking through the API and return the response body.
///
/// # Panics
///
/// Panics if the request fails or the response is not a 201 with a body.
pub async fn create_booking(client: &Client, email: &str, date: &str) -> serde_json::Value {
    let resp = client
        .post(format!("{}/api/bookings", api_base_url()))
        .json(&serde_json::json!({
            "clientName": "Integration Test",
            "phone": "0500000000",
            "email": email,
            "sessionType": "family",
            "preferredDate": date,
        }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    resp.json().await.expect("Failed to read booking response")
}

/// Flip a booking's status directly in the database.
///
/// The HTTP surface deliberately has no status endpoint; tests stand in for
/// the operator the same way `lw-cli booking confirm` does.
///
/// # Panics
///
/// Panics if the identifier is not a UUID or the update fails.
pub async fn set_booking_status(pool: &PgPool, booking_id: &str, status: BookingStatus) {
    let id = Uuid::parse_str(booking_id).expect("booking id is not a UUID");
    sqlx::query("UPDATE studio.booking SET status = $1 WHERE id = $2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to update booking status");
}
