//! Business logic services for the booking and order API.
//!
//! # Services
//!
//! - `bookings` - Booking validation and lifecycle
//! - `orders` - Digital album order validation and cross-reference checks
//! - `email` - Outbound notification email (fire-and-forget)
//!
//! Each service is a stateless request-scoped value borrowing the shared
//! connection pool; handlers construct one per request, pass it an explicit
//! input value object, and get back a result-or-error.

pub mod bookings;
pub mod email;
pub mod orders;
