//! Booking repository for database operations.
//!
//! Queries are runtime-checked `query_as` calls against `studio.booking`;
//! row types convert to domain types via `TryFrom`, surfacing unknown stored
//! enum values as [`RepositoryError::DataCorruption`].

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use little_wonders_core::{BookingId, BookingStatus, Email};

use super::RepositoryError;
use crate::models::booking::{Booking, NewBooking};

/// Internal row type for `PostgreSQL` booking queries.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    client_name: String,
    phone: String,
    email: String,
    session_type: String,
    preferred_date: NaiveDate,
    notes: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: BookingId::new(row.id),
            client_name: row.client_name,
            phone: row.phone,
            email,
            session_type: row
                .session_type
                .parse()
                .map_err(RepositoryError::DataCorruption)?,
            preferred_date: row.preferred_date,
            notes: row.notes,
            status: row.status.parse().map_err(RepositoryError::DataCorruption)?,
            created_at: row.created_at,
        })
    }
}

/// Repository for booking database operations.
pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new booking with `status = pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a booking already exists for
    /// the same (email, `preferred_date`) pair.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, input: &NewBooking) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r"
            INSERT INTO studio.booking
                (client_name, phone, email, session_type, preferred_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, client_name, phone, email, session_type,
                      preferred_date, notes, status, created_at
            ",
        )
        .bind(&input.client_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(input.session_type.as_str())
        .bind(input.preferred_date)
        .bind(&input.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "booking already exists for this email and date".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// List every booking, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r"
            SELECT id, client_name, phone, email, session_type,
                   preferred_date, notes, status, created_at
            FROM studio.booking
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a booking by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r"
            SELECT id, client_name, phone, email, session_type,
                   preferred_date, notes, status, created_at
            FROM studio.booking
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Distinct dates holding at least one non-cancelled booking, ascending.
    ///
    /// Point-in-time read with no consistency guarantee against concurrent
    /// creates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn booked_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            r"
            SELECT DISTINCT preferred_date
            FROM studio.booking
            WHERE status <> 'cancelled'
            ORDER BY preferred_date
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(date,)| date).collect())
    }

    /// Set a booking's status (administrative action, no transition checks).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no booking matches the ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r"
            UPDATE studio.booking
            SET status = $2
            WHERE id = $1
            RETURNING id, client_name, phone, email, session_type,
                      preferred_date, notes, status, created_at
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use little_wonders_core::SessionType;

    fn sample_row() -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            client_name: "Maya Cohen".to_owned(),
            phone: "0501234567".to_owned(),
            email: "maya@example.com".to_owned(),
            session_type: "newborn".to_owned(),
            preferred_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            notes: String::new(),
            status: "pending".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let row = sample_row();
        let id = row.id;
        let booking = Booking::try_from(row).unwrap();
        assert_eq!(booking.id.as_uuid(), id);
        assert_eq!(booking.session_type, SessionType::Newborn);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_status() {
        let mut row = sample_row();
        row.status = "archived".to_owned();
        assert!(matches!(
            Booking::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_row_conversion_rejects_unknown_session_type() {
        let mut row = sample_row();
        row.session_type = "wedding".to_owned();
        assert!(matches!(
            Booking::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_row_conversion_rejects_bad_email() {
        let mut row = sample_row();
        row.email = "not-an-email".to_owned();
        assert!(matches!(
            Booking::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
