//! Digital album order repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use little_wonders_core::{BookingId, Email, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order};

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    booking_id: Uuid,
    customer_email: String,
    customer_name: String,
    package_type: String,
    status: String,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_email = Email::parse(&row.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            booking_id: BookingId::new(row.booking_id),
            customer_email,
            customer_name: row.customer_name,
            package_type: row
                .package_type
                .parse()
                .map_err(RepositoryError::DataCorruption)?,
            status: row.status.parse().map_err(RepositoryError::DataCorruption)?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for digital album order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order with `status = pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order already exists for
    /// the same (`booking_id`, `customer_email`) pair.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, input: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO studio.digital_album_order
                (booking_id, customer_email, customer_name, package_type, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, booking_id, customer_email, customer_name,
                      package_type, status, notes, created_at, updated_at
            ",
        )
        .bind(input.booking_id)
        .bind(&input.customer_email)
        .bind(&input.customer_name)
        .bind(input.package_type.as_str())
        .bind(&input.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "order already exists for this booking and email".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// List every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, booking_id, customer_email, customer_name,
                   package_type, status, notes, created_at, updated_at
            FROM studio.digital_album_order
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, booking_id, customer_email, customer_name,
                   package_type, status, notes, created_at, updated_at
            FROM studio.digital_album_order
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List the orders referencing one booking, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, booking_id, customer_email, customer_name,
                   package_type, status, notes, created_at, updated_at
            FROM studio.digital_album_order
            WHERE booking_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(booking_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Set an order's status, refreshing `updated_at` (administrative action,
    /// no transition checks).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order matches the ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE studio.digital_album_order
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, booking_id, customer_email, customer_name,
                      package_type, status, notes, created_at, updated_at
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
    use little_wonders_core::PackageType;

    fn sample_row() -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            customer_email: "dana@example.com".to_owned(),
            customer_name: "Dana".to_owned(),
            package_type: "premium".to_owned(),
            status: "pending".to_owned(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let row = sample_row();
        let order = Order::try_from(row).unwrap();
        assert_eq!(order.package_type, PackageType::Premium);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_package() {
        let mut row = sample_row();
        row.package_type = "deluxe".to_owned();
        assert!(matches!(
            Order::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_row_conversion_rejects_unknown_status() {
        let mut row = sample_row();
        row.status = "shipped".to_owned();
        assert!(matches!(
            Order::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
