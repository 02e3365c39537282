//! Digital album order service.
//!
//! Order creation cross-validates against the referenced booking, failing
//! fast on the first violated check: the booking must exist, must be
//! confirmed, and must have been made with the customer's email. The
//! (`booking_id`, `customer_email`) uniqueness invariant is the database's
//! job; this layer translates the conflict signal into `DuplicateOrder`
//! instead of pre-checking (a pre-check would race).

use serde::Deserialize;
use sqlx::PgPool;

use little_wonders_core::{BookingId, BookingStatus, OrderId, PackageType};

use crate::db::RepositoryError;
use crate::db::bookings::BookingRepository;
use crate::db::orders::OrderRepository;
use crate::error::ApiError;
use crate::models::booking::Booking;
use crate::models::order::{NewOrder, Order, OrderWithBooking};

/// Raw client input for creating a digital album order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Digital album order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    bookings: BookingRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            bookings: BookingRepository::new(pool),
        }
    }

    /// Create an order from raw client input.
    ///
    /// Returns the created order joined with its booking.
    ///
    /// # Errors
    ///
    /// In check order: `ApiError::BookingNotFound` when the booking does not
    /// resolve, `ApiError::BookingNotConfirmed` unless its status is
    /// `confirmed`, `ApiError::EmailMismatch` when the customer email differs
    /// from the booking's, `ApiError::Validation` for missing or malformed
    /// fields, and `ApiError::DuplicateOrder` when the (booking, email) pair
    /// already has an order.
    pub async fn create(&self, input: CreateOrder) -> Result<OrderWithBooking, ApiError> {
        // An unparsable identifier references nothing.
        let booking_id = input
            .booking_id
            .as_deref()
            .unwrap_or_default()
            .trim()
            .parse::<BookingId>()
            .map_err(|_| ApiError::BookingNotFound)?;

        let booking = self
            .bookings
            .get(booking_id)
            .await?
            .ok_or(ApiError::BookingNotFound)?;

        let new_order = prepare(input, &booking)?;

        let order = self.orders.insert(&new_order).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => ApiError::DuplicateOrder,
            other => ApiError::Repository(other),
        })?;

        Ok(OrderWithBooking {
            order,
            booking: Some(booking),
        })
    }

    /// Every order, newest first, each joined with its booking.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Repository` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderWithBooking>, ApiError> {
        let orders = self.orders.list_all().await?;
        self.join_bookings(orders).await
    }

    /// Look up one order by its path identifier, joined with its booking.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when no order matches (an unparsable
    /// identifier references nothing and maps the same way).
    pub async fn get(&self, id: &str) -> Result<OrderWithBooking, ApiError> {
        let id: OrderId = id.parse().map_err(|_| ApiError::NotFound("Order"))?;

        let order = self
            .orders
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Order"))?;

        let booking = self.bookings.get(order.booking_id).await?;

        Ok(OrderWithBooking { order, booking })
    }

    /// The orders referencing one booking, newest first, joined.
    ///
    /// An empty collection is not an error; an unparsable booking identifier
    /// references nothing and yields the same.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Repository` if a query fails.
    pub async fn list_by_booking(
        &self,
        booking_id: &str,
    ) -> Result<Vec<OrderWithBooking>, ApiError> {
        let Ok(booking_id) = booking_id.parse::<BookingId>() else {
            return Ok(Vec::new());
        };

        let orders = self.orders.list_by_booking(booking_id).await?;
        self.join_bookings(orders).await
    }

    /// Read-through join: resolve each order's booking by secondary lookup.
    async fn join_bookings(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderWithBooking>, ApiError> {
        let mut joined = Vec::with_capacity(orders.len());
        for order in orders {
            let booking = self.bookings.get(order.booking_id).await?;
            joined.push(OrderWithBooking { order, booking });
        }
        Ok(joined)
    }
}

/// Cross-validate raw input against the resolved booking.
///
/// Runs the confirmed-status and email-match checks before field validation,
/// preserving the fail-fast order of the creation flow. On success the
/// order's email is the booking's (they are equal after case folding).
fn prepare(input: CreateOrder, booking: &Booking) -> Result<NewOrder, ApiError> {
    if booking.status != BookingStatus::Confirmed {
        return Err(ApiError::BookingNotConfirmed);
    }

    let customer_email = input
        .customer_email
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if customer_email != booking.email.as_str() {
        return Err(ApiError::EmailMismatch);
    }

    let mut problems: Vec<&str> = Vec::new();

    let customer_name = input
        .customer_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();
    if customer_name.is_empty() {
        problems.push("Please provide customer name");
    }

    let package_type = match input.package_type.as_deref().map(str::trim) {
        None | Some("") => {
            problems.push("Please select package type");
            None
        }
        Some(raw) => match raw.parse::<PackageType>() {
            Ok(package_type) => Some(package_type),
            Err(_) => {
                problems.push("Please select a valid package type");
                None
            }
        },
    };

    if !problems.is_empty() {
        return Err(ApiError::Validation(problems.join(", ")));
    }

    let Some(package_type) = package_type else {
        return Err(ApiError::Internal(
            "order validation produced no errors but fields are missing".to_owned(),
        ));
    };

    Ok(NewOrder {
        booking_id: booking.id,
        customer_email: booking.email.clone(),
        customer_name,
        package_type,
        notes: input.notes.unwrap_or_default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use little_wonders_core::{Email, SessionType};

    fn confirmed_booking() -> Booking {
        Booking {
            id: BookingId::generate(),
            client_name: "Dana".to_owned(),
            phone: "0501234567".to_owned(),
            email: Email::parse("dana@example.com").unwrap(),
            session_type: SessionType::Family,
            preferred_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            notes: String::new(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    fn valid_input() -> CreateOrder {
        CreateOrder {
            booking_id: None,
            customer_email: Some("dana@example.com".to_owned()),
            customer_name: Some("Dana".to_owned()),
            package_type: Some("premium".to_owned()),
            notes: None,
        }
    }

    #[test]
    fn test_prepare_valid_input() {
        let booking = confirmed_booking();
        let order = prepare(valid_input(), &booking).unwrap();
        assert_eq!(order.booking_id, booking.id);
        assert_eq!(order.customer_email, booking.email);
        assert_eq!(order.package_type, PackageType::Premium);
    }

    #[test]
    fn test_prepare_rejects_pending_booking() {
        let mut booking = confirmed_booking();
        booking.status = BookingStatus::Pending;
        assert!(matches!(
            prepare(valid_input(), &booking),
            Err(ApiError::BookingNotConfirmed)
        ));
    }

    #[test]
    fn test_prepare_rejects_cancelled_booking() {
        let mut booking = confirmed_booking();
        booking.status = BookingStatus::Cancelled;
        assert!(matches!(
            prepare(valid_input(), &booking),
            Err(ApiError::BookingNotConfirmed)
        ));
    }

    #[test]
    fn test_prepare_rejects_mismatched_email() {
        let mut input = valid_input();
        input.customer_email = Some("other@example.com".to_owned());
        assert!(matches!(
            prepare(input, &confirmed_booking()),
            Err(ApiError::EmailMismatch)
        ));
    }

    #[test]
    fn test_prepare_matches_email_case_insensitively() {
        let mut input = valid_input();
        input.customer_email = Some("Dana@Example.COM".to_owned());
        assert!(prepare(input, &confirmed_booking()).is_ok());
    }

    #[test]
    fn test_prepare_missing_email_is_a_mismatch() {
        let mut input = valid_input();
        input.customer_email = None;
        assert!(matches!(
            prepare(input, &confirmed_booking()),
            Err(ApiError::EmailMismatch)
        ));
    }

    #[test]
    fn test_status_check_precedes_email_check() {
        let mut booking = confirmed_booking();
        booking.status = BookingStatus::Pending;
        let mut input = valid_input();
        input.customer_email = Some("other@example.com".to_owned());
        assert!(matches!(
            prepare(input, &booking),
            Err(ApiError::BookingNotConfirmed)
        ));
    }

    #[test]
    fn test_prepare_collects_field_problems() {
        let input = CreateOrder {
            customer_email: Some("dana@example.com".to_owned()),
            ..CreateOrder::default()
        };
        let Err(ApiError::Validation(message)) = prepare(input, &confirmed_booking()) else {
            panic!("expected a validation failure");
        };
        assert!(message.contains("Please provide customer name"));
        assert!(message.contains("Please select package type"));
    }

    #[test]
    fn test_prepare_rejects_unknown_package() {
        let mut input = valid_input();
        input.package_type = Some("deluxe".to_owned());
        let Err(ApiError::Validation(message)) = prepare(input, &confirmed_booking()) else {
            panic!("expected a validation failure");
        };
        assert!(message.contains("Please select a valid package type"));
    }
}
