//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STUDIO_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `STUDIO_HOST` - Bind address (default: 127.0.0.1)
//! - `STUDIO_PORT` - Listen port (default: 4000)
//! - `STUDIO_CORS_ORIGIN` - Front-end origin allowed by CORS; when unset the
//!   API answers any origin (development mode)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Optional (email notifications; all required together once `SMTP_HOST` is set)
//! - `SMTP_HOST` - SMTP relay host
//! - `SMTP_PORT` - SMTP relay port (default: 587)
//! - `SMTP_USERNAME` - SMTP username
//! - `SMTP_PASSWORD` - SMTP password
//! - `SMTP_FROM` - From address for outbound notifications

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Front-end origin allowed by CORS, if restricted
    pub cors_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Outbound email configuration, when notifications are enabled
    pub email: Option<EmailConfig>,
}

/// SMTP configuration for outbound notification email.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: SecretString,
    /// From address for outbound mail
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = required_var("STUDIO_DATABASE_URL").map(SecretString::from)?;

        let host = optional_var("STUDIO_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STUDIO_HOST".to_owned(), e.to_string()))?;

        let port = optional_var("STUDIO_PORT")
            .unwrap_or_else(|| "4000".to_owned())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STUDIO_PORT".to_owned(), e.to_string()))?;

        let email = load_email_config()?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin: optional_var("STUDIO_CORS_ORIGIN"),
            sentry_dsn: optional_var("SENTRY_DSN"),
            sentry_environment: optional_var("SENTRY_ENVIRONMENT"),
            email,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load the SMTP block, keyed off `SMTP_HOST`.
///
/// When `SMTP_HOST` is absent the API runs without outbound email; once it is
/// set, the remaining SMTP variables become required.
fn load_email_config() -> Result<Option<EmailConfig>, ConfigError> {
    let Some(smtp_host) = optional_var("SMTP_HOST") else {
        return Ok(None);
    };

    let smtp_port = optional_var("SMTP_PORT")
        .unwrap_or_else(|| "587".to_owned())
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_owned(), e.to_string()))?;

    Ok(Some(EmailConfig {
        smtp_host,
        smtp_port,
        smtp_username: required_var("SMTP_USERNAME")?,
        smtp_password: required_var("SMTP_PASSWORD").map(SecretString::from)?,
        from_address: required_var("SMTP_FROM")?,
    }))
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            database_url: SecretString::from("postgres://localhost/studio".to_owned()),
            host: "0.0.0.0".parse().unwrap(),
            port: 4000,
            cors_origin: None,
            sentry_dsn: None,
            sentry_environment: None,
            email: Some(EmailConfig {
                smtp_host: "smtp.example.com".to_owned(),
                smtp_port: 587,
                smtp_username: "mailer".to_owned(),
                smtp_password: SecretString::from("hunter2".to_owned()),
                from_address: "studio@littlewonders.example".to_owned(),
            }),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn test_email_config_debug_redacts_password() {
        let config = test_config();
        let debug = format!("{:?}", config.email.unwrap());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
