//! Digital album order operator commands.
//!
//! Moves an order through its lifecycle (`pending` → `confirmed` →
//! `processing` → `completed`, or `cancelled`). No transition validation is
//! performed; any enumeration value is accepted and `updated_at` is
//! refreshed on every change.
//!
//! # Usage
//!
//! ```bash
//! lw-cli order status -i <order-id> -s processing
//! ```
//!
//! # Environment Variables
//!
//! - `STUDIO_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use little_wonders_api::db::RepositoryError;
use little_wonders_api::db::orders::OrderRepository;
use little_wonders_core::{OrderId, OrderStatus};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The supplied identifier is not a UUID.
    #[error("Invalid order id: {0}")]
    InvalidId(String),

    /// The supplied status is not in the enumeration.
    #[error("Invalid status: {0}. Valid statuses: pending, confirmed, processing, completed, cancelled")]
    InvalidStatus(String),

    /// No order matches the identifier.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// Set an order's status.
///
/// # Errors
///
/// Returns `OrderCommandError` if the identifier or status is malformed, the
/// order does not exist, or the database is unreachable.
pub async fn set_status(id: &str, status: &str) -> Result<(), OrderCommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STUDIO_DATABASE_URL")
        .map_err(|_| OrderCommandError::MissingEnvVar("STUDIO_DATABASE_URL"))?;

    let order_id: OrderId = id
        .parse()
        .map_err(|_| OrderCommandError::InvalidId(id.to_owned()))?;

    let status: OrderStatus = status
        .parse()
        .map_err(|_| OrderCommandError::InvalidStatus(status.to_owned()))?;

    tracing::info!("Connecting to studio database...");
    let pool = PgPool::connect(&database_url).await?;

    let orders = OrderRepository::new(&pool);
    let order = orders
        .update_status(order_id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => OrderCommandError::NotFound(id.to_owned()),
            other => OrderCommandError::Repository(other),
        })?;

    tracing::info!(
        "Order {} ({}) is now {}",
        order.id,
        order.customer_email,
        order.status
    );
    Ok(())
}
