//! Booking service.
//!
//! Validates client-submitted booking requests and persists them. The
//! (`email`, `preferred_date`) uniqueness invariant is enforced by the
//! database; this layer only translates the conflict signal, it never
//! pre-checks existence (a pre-check would race with concurrent creates).

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use little_wonders_core::{BookingId, Email, EmailError, SessionType};

use crate::db::RepositoryError;
use crate::db::bookings::BookingRepository;
use crate::error::ApiError;
use crate::models::booking::{Booking, NewBooking};

/// Wire format for `preferred_date`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw client input for creating a booking.
///
/// Every field arrives as an optional string so one validation pass can
/// report all offending fields instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Booking service.
pub struct BookingService<'a> {
    bookings: BookingRepository<'a>,
}

impl<'a> BookingService<'a> {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool),
        }
    }

    /// Create a booking from raw client input.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::DateInPast` if the requested date precedes today,
    /// `ApiError::Validation` naming every missing or malformed field, and
    /// `ApiError::DuplicateBooking` when the (email, date) pair is taken.
    pub async fn create(&self, input: CreateBooking) -> Result<Booking, ApiError> {
        let new_booking = prepare(input, Utc::now().date_naive())?;

        self.bookings
            .insert(&new_booking)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ApiError::DuplicateBooking,
                other => ApiError::Repository(other),
            })
    }

    /// Every booking, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Repository` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Booking>, ApiError> {
        Ok(self.bookings.list_all().await?)
    }

    /// Look up one booking by its path identifier.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidIdentifier` when the identifier is not a
    /// UUID (distinct from `NotFound`), and `ApiError::NotFound` when no
    /// booking matches.
    pub async fn get(&self, id: &str) -> Result<Booking, ApiError> {
        let id: BookingId = id
            .parse()
            .map_err(|_| ApiError::InvalidIdentifier(id.to_owned()))?;

        self.bookings
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))
    }

    /// Date strings holding at least one non-cancelled booking.
    ///
    /// Callers use this as the complement of the free dates.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Repository` if the query fails.
    pub async fn booked_dates(&self) -> Result<Vec<String>, ApiError> {
        let dates = self.bookings.booked_dates().await?;
        Ok(dates
            .into_iter()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect())
    }
}

/// Validate raw input into a persistable booking.
///
/// The past-date check runs first: a parseable date strictly before `today`
/// fails with `DateInPast` regardless of any other field's validity. After
/// that, one pass collects every offending field into a single
/// `ValidationFailure` message.
fn prepare(input: CreateBooking, today: NaiveDate) -> Result<NewBooking, ApiError> {
    let raw_date = input
        .preferred_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let parsed_date = raw_date.map(|s| NaiveDate::parse_from_str(s, DATE_FORMAT));

    if let Some(Ok(date)) = &parsed_date
        && *date < today
    {
        return Err(ApiError::DateInPast);
    }

    let mut problems: Vec<&str> = Vec::new();

    let client_name = input
        .client_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();
    if client_name.is_empty() {
        problems.push("Please provide client name");
    }

    let phone = input
        .phone
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();
    if phone.is_empty() {
        problems.push("Please provide phone number");
    }

    let email = match Email::parse(input.email.as_deref().unwrap_or_default()) {
        Ok(email) => Some(email),
        Err(EmailError::Empty) => {
            problems.push("Please provide email");
            None
        }
        Err(_) => {
            problems.push("Please provide a valid email");
            None
        }
    };

    let session_type = match input.session_type.as_deref().map(str::trim) {
        None | Some("") => {
            problems.push("Please select session type");
            None
        }
        Some(raw) => match raw.parse::<SessionType>() {
            Ok(session_type) => Some(session_type),
            Err(_) => {
                problems.push("Please select a valid session type");
                None
            }
        },
    };

    let preferred_date = match parsed_date {
        None => {
            problems.push("Please select preferred date");
            None
        }
        Some(Err(_)) => {
            problems.push("Please provide a valid preferred date");
            None
        }
        Some(Ok(date)) => Some(date),
    };

    if !problems.is_empty() {
        return Err(ApiError::Validation(problems.join(", ")));
    }

    let (Some(email), Some(session_type), Some(preferred_date)) =
        (email, session_type, preferred_date)
    else {
        return Err(ApiError::Internal(
            "booking validation produced no errors but fields are missing".to_owned(),
        ));
    };

    Ok(NewBooking {
        client_name,
        phone,
        email,
        session_type,
        preferred_date,
        notes: input.notes.unwrap_or_default(),
    })
}
