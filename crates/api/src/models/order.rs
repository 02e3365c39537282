//! Digital album order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use little_wonders_core::{BookingId, Email, OrderId, OrderStatus, PackageType};

use super::booking::Booking;

/// A digital album order (domain type).
///
/// Holds a non-owning reference to exactly one booking; the booking's
/// lifetime is independent and cancelling it does not cascade here. The
/// (`booking_id`, `customer_email`) pair is unique, enforced by the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The booking this album belongs to.
    pub booking_id: BookingId,
    /// Customer's email, normalized to lower case; matched against the
    /// booking's email at creation time only.
    pub customer_email: Email,
    /// Customer's display name.
    pub customer_name: String,
    /// Album package tier.
    pub package_type: PackageType,
    /// Lifecycle state; starts as `pending`.
    pub status: OrderStatus,
    /// Free-form notes from the customer.
    pub notes: String,
    /// When the order was created; immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutating write.
    pub updated_at: DateTime<Utc>,
}

/// An order paired with the booking it references (read-through join).
///
/// The booking is resolved by an explicit secondary lookup and omitted from
/// the JSON when the lookup finds nothing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithBooking {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

/// Validated input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub booking_id: BookingId,
    pub customer_email: Email,
    pub customer_name: String,
    pub package_type: PackageType,
    pub notes: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use little_wonders_core::{BookingStatus, SessionType};

    fn sample_order() -> Order {
        Order {
            id: OrderId::generate(),
            booking_id: BookingId::generate(),
            customer_email: Email::parse("dana@example.com").unwrap(),
            customer_name: "Dana".to_owned(),
            package_type: PackageType::Premium,
            status: OrderStatus::Pending,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["customerName"], "Dana");
        assert_eq!(json["packageType"], "premium");
        assert_eq!(json["status"], "pending");
        assert!(json.get("bookingId").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_order_with_booking_flattens_and_joins() {
        let order = sample_order();
        let booking = Booking {
            id: order.booking_id,
            client_name: "Dana".to_owned(),
            phone: "0501234567".to_owned(),
            email: order.customer_email.clone(),
            session_type: SessionType::Family,
            preferred_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            notes: String::new(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(OrderWithBooking {
            order,
            booking: Some(booking),
        })
        .unwrap();

        // Order fields flattened at the top level
        assert_eq!(json["packageType"], "premium");
        // Joined booking nested alongside
        assert_eq!(json["booking"]["status"], "confirmed");
    }

    #[test]
    fn test_missing_booking_is_omitted() {
        let json = serde_json::to_value(OrderWithBooking {
            order: sample_order(),
            booking: None,
        })
        .unwrap();

        assert!(json.get("booking").is_none());
    }
}
