//! Integration tests for the booking API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p little-wonders-cli -- migrate)
//! - The API server running (cargo run -p little-wonders-api)
//!
//! Run with: cargo test -p little-wonders-integration-tests -- --ignored

#![allow(clippy::expect_used, clippy::unwrap_used)]

use reqwest::StatusCode;

use little_wonders_core::BookingStatus;

use little_wonders_integration_tests::{
    api_base_url, client, create_booking, future_date, set_booking_status, test_pool,
    unique_email,
};

// ============================================================================
// Create & Get
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_create_and_get_booking_roundtrip() {
    let client = client();
    let base_url = api_base_url();

    let email = unique_email();
    let date = future_date(30);
    let body = create_booking(&client, &email, &date).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["clientName"], "Integration Test");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["preferredDate"], date.as_str());

    // Get it back by ID and compare
    let id = body["data"]["id"].as_str().expect("booking has an id");
    let resp = client
        .get(format!("{base_url}/api/bookings/{id}"))
        .send()
        .await
        .expect("Failed to get booking");

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: serde_json::Value = resp.json().await.expect("Failed to read response");
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_create_normalizes_email_to_lower_case() {
    let client = client();

    let email = format!("IT-{}@Example.COM", uuid::Uuid::new_v4());
    let body = create_booking(&client, &email, &future_date(31)).await;

    assert_eq!(
        body["data"]["email"].as_str().unwrap(),
        email.to_lowercase()
    );
}

// ============================================================================
// Duplicate detection
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_duplicate_booking_rejected() {
    let client = client();
    let base_url = api_base_url();

    let email = unique_email();
    let date = future_date(32);
    create_booking(&client, &email, &date).await;

    // Same (email, date) again - upper-cased email must still collide
    let resp = client
        .post(format!("{base_url}/api/bookings"))
        .json(&serde_json::json!({
            "clientName": "Integration Test",
            "phone": "0500000000",
            "email": email.to_uppercase(),
            "sessionType": "family",
            "preferredDate": date,
        }))
        .send()
        .await
        .expect("Failed to create duplicate booking");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("already exists")
    );
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_past_date_rejected() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/bookings"))
        .json(&serde_json::json!({
            "clientName": "Integration Test",
            "phone": "0500000000",
            "email": unique_email(),
            "sessionType": "newborn",
            "preferredDate": "2020-01-01",
        }))
        .send()
        .await
        .expect("Failed to send booking");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Cannot book a date in the past");
}

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_validation_failure_names_offending_fields() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/bookings"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to send booking");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.expect("Failed to read response");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Please provide client name"));
    assert!(message.contains("Please provide email"));
    assert!(message.contains("Please select preferred date"));
}

// ============================================================================
// Lookup errors
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_invalid_identifier_is_distinct_from_not_found() {
    let client = client();
    let base_url = api_base_url();

    // Syntactically invalid identifier
    let resp = client
        .get(format!("{base_url}/api/bookings/not-a-uuid"))
        .send()
        .await
        .expect("Failed to get booking");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Valid but unknown identifier
    let resp = client
        .get(format!("{base_url}/api/bookings/{}", uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to get booking");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_list_bookings_count_matches_data() {
    let client = client();
    let base_url = api_base_url();

    create_booking(&client, &unique_email(), &future_date(33)).await;

    let resp = client
        .get(format!("{base_url}/api/bookings"))
        .send()
        .await
        .expect("Failed to list bookings");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], true);
    assert_eq!(
        body["count"].as_u64().unwrap() as usize,
        body["data"].as_array().unwrap().len()
    );
}

#[tokio::test]
#[ignore = "Requires a running API server and PostgreSQL"]
async fn test_available_dates_excludes_cancelled_bookings() {
    let client = client();
    let base_url = api_base_url();
    let pool = test_pool().await;

    // A far-future date unlikely to be shared with other test runs
    let date = future_date(1000 + u64::from(rand_offset()));
    let body = create_booking(&client, &unique_email(), &date).await;
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    // Freshly created (pending) booking occupies its date
    let dates = booked_dates(&client, &base_url).await;
    assert!(dates.contains(&date));

    // Cancelled bookings release the date
    set_booking_status(&pool, &id, BookingStatus::Cancelled).await;
    let dates = booked_dates(&client, &base_url).await;
    assert!(!dates.contains(&date));
}

async fn booked_dates(client: &reqwest::Client, base_url: &str) -> Vec<String> {
    let resp = client
        .get(format!("{base_url}/api/bookings/available-dates"))
        .send()
        .await
        .expect("Failed to get available dates");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("Failed to read response");
    body["data"]
        .as_array()
        .expect("dates are an array")
        .iter()
        .map(|d| d.as_str().unwrap().to_owned())
        .collect()
}

/// A small pseudo-random offset so parallel runs pick different dates.
fn rand_offset() -> u16 {
    u16::from_le_bytes([
        uuid::Uuid::new_v4().as_bytes()[0],
        uuid::Uuid::new_v4().as_bytes()[1],
    ]) % 5000
}
