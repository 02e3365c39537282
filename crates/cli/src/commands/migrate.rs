//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lw-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STUDIO_DATABASE_URL` - `PostgreSQL` connection string
//!
//! Migration files live in `crates/api/migrations/`.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the studio database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STUDIO_DATABASE_URL")
        .map_err(|_| MigrationError::MissingEnvVar("STUDIO_DATABASE_URL"))?;

    tracing::info!("Connecting to studio database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
