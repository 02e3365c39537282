//! Email service for outbound booking and order notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Sending is
//! fire-and-forget from the request path: handlers call the `queue_*`
//! helpers, which spawn the send and log failures instead of surfacing them
//! to the client.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::booking::Booking;
use crate::models::order::Order;

/// HTML template for the booking-received email.
#[derive(Template)]
#[template(path = "email/booking_received.html")]
struct BookingReceivedHtml<'a> {
    client_name: &'a str,
    session_type: &'a str,
    preferred_date: &'a str,
}

/// Plain text template for the booking-received email.
#[derive(Template)]
#[template(path = "email/booking_received.txt")]
struct BookingReceivedText<'a> {
    client_name: &'a str,
    session_type: &'a str,
    preferred_date: &'a str,
}

/// HTML template for the order-received email.
#[derive(Template)]
#[template(path = "email/order_received.html")]
struct OrderReceivedHtml<'a> {
    customer_name: &'a str,
    package_type: &'a str,
}

/// Plain text template for the order-received email.
#[derive(Template)]
#[template(path = "email/order_received.txt")]
struct OrderReceivedText<'a> {
    customer_name: &'a str,
    package_type: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Queue the booking-received notification; failures are logged only.
    pub fn queue_booking_received(&self, booking: &Booking) {
        let service = self.clone();
        let to = booking.email.to_string();
        let client_name = booking.client_name.clone();
        let session_type = booking.session_type.to_string();
        let preferred_date = booking.preferred_date.to_string();

        tokio::spawn(async move {
            if let Err(e) = service
                .send_booking_received(&to, &client_name, &session_type, &preferred_date)
                .await
            {
                tracing::warn!(error = %e, to = %to, "Failed to send booking notification");
            }
        });
    }

    /// Queue the order-received notification; failures are logged only.
    pub fn queue_order_received(&self, order: &Order) {
        let service = self.clone();
        let to = order.customer_email.to_string();
        let customer_name = order.customer_name.clone();
        let package_type = order.package_type.to_string();

        tokio::spawn(async move {
            if let Err(e) = service
                .send_order_received(&to, &customer_name, &package_type)
                .await
            {
                tracing::warn!(error = %e, to = %to, "Failed to send order notification");
            }
        });
    }

    /// Send the booking-received notification.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_booking_received(
        &self,
        to: &str,
        client_name: &str,
        session_type: &str,
        preferred_date: &str,
    ) -> Result<(), EmailError> {
        let html = BookingReceivedHtml {
            client_name,
            session_type,
            preferred_date,
        }
        .render()?;
        let text = BookingReceivedText {
            client_name,
            session_type,
            preferred_date,
        }
        .render()?;

        self.send_multipart_email(to, "We received your booking request", &text, &html)
            .await
    }

    /// Send the order-received notification.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_order_received(
        &self,
        to: &str,
        customer_name: &str,
        package_type: &str,
    ) -> Result<(), EmailError> {
        let html = OrderReceivedHtml {
            customer_name,
            package_type,
        }
        .render()?;
        let text = OrderReceivedText {
            customer_name,
            package_type,
        }
        .render()?;

        self.send_multipart_email(to, "Your digital album order", &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_received_templates_render() {
        let html = BookingReceivedHtml {
            client_name: "Dana",
            session_type: "family",
            preferred_date: "2099-01-01",
        }
        .render()
        .unwrap();
        assert!(html.contains("Dana"));
        assert!(html.contains("2099-01-01"));

        let text = BookingReceivedText {
            client_name: "Dana",
            session_type: "family",
            preferred_date: "2099-01-01",
        }
        .render()
        .unwrap();
        assert!(text.contains("family"));
    }

    #[test]
    fn test_order_received_templates_render() {
        let html = OrderReceivedHtml {
            customer_name: "Dana",
            package_type: "premium",
        }
        .render()
        .unwrap();
        assert!(html.contains("premium"));

        let text = OrderReceivedText {
            customer_name: "Dana",
            package_type: "premium",
        }
        .render()
        .unwrap();
        assert!(text.contains("Dana"));
    }
}
