//! Seed the database with demo bookings.
//!
//! Inserts a handful of bookings on upcoming dates and confirms the first
//! one so digital album orders can be exercised right away. Re-running is
//! safe: bookings that already exist are skipped.

use chrono::{Days, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use little_wonders_api::db::RepositoryError;
use little_wonders_api::db::bookings::BookingRepository;
use little_wonders_api::models::booking::NewBooking;
use little_wonders_core::{BookingStatus, Email, EmailError, SessionType};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A seed fixture carries a malformed email.
    #[error("Invalid seed email: {0}")]
    Email(#[from] EmailError),
}

/// Demo bookings: name, phone, email, session type, days from today.
const DEMO_BOOKINGS: [(&str, &str, &str, SessionType, u64); 3] = [
    (
        "Maya Cohen",
        "0501234567",
        "maya@example.com",
        SessionType::Newborn,
        7,
    ),
    (
        "Noa Levi",
        "0527654321",
        "noa@example.com",
        SessionType::Family,
        14,
    ),
    (
        "Tamar Azulay",
        "0543216789",
        "tamar@example.com",
        SessionType::Kids,
        21,
    ),
];

/// Seed demo bookings.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails for
/// a reason other than the booking already existing.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STUDIO_DATABASE_URL")
        .map_err(|_| SeedError::MissingEnvVar("STUDIO_DATABASE_URL"))?;

    info!("Connecting to studio database...");
    let pool = PgPool::connect(&database_url).await?;
    let bookings = BookingRepository::new(&pool);

    let today = Utc::now().date_naive();
    let mut first_id = None;

    for (client_name, phone, email, session_type, offset) in DEMO_BOOKINGS {
        let input = NewBooking {
            client_name: client_name.to_owned(),
            phone: phone.to_owned(),
            email: Email::parse(email)?,
            session_type,
            preferred_date: today + Days::new(offset),
            notes: String::new(),
        };

        match bookings.insert(&input).await {
            Ok(booking) => {
                info!("Seeded booking {} for {}", booking.id, booking.email);
                first_id.get_or_insert(booking.id);
            }
            Err(RepositoryError::Conflict(_)) => {
                warn!("Booking for {email} already seeded, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Confirm one booking so album orders have something to reference
    if let Some(id) = first_id {
        let booking = bookings.update_status(id, BookingStatus::Confirmed).await?;
        info!("Confirmed booking {}", booking.id);
    }

    info!("Seeding complete!");
    Ok(())
}
