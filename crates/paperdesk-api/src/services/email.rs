//! Email delivery of completed order results via SMTP.
//!
//! Delivery is best-effort: the caller logs a failure and the order stays
//! completed, the customer can still download the result.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use paperdesk_core::models::Order;
use paperdesk_core::Config;
use std::sync::Arc;

/// Email service for sending order results.
/// No-op if email delivery is disabled or SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    frontend_url: Option<String>,
}

impl EmailService {
    /// Create email service from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_enabled() {
            tracing::debug!("Email delivery disabled (EMAIL_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            frontend_url: config.frontend_url().map(String::from),
        })
    }

    /// Send the processed result to the customer, with the output attached.
    pub async fn send_order_result(
        &self,
        order: &Order,
        attachment_name: &str,
        attachment_content_type: &str,
        attachment_data: Vec<u8>,
    ) -> Result<(), String> {
        let to_addr: Mailbox = order
            .customer_email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let mut body = format!(
            "Hello {},\n\nYour order for {} is complete. The result is attached.\n\nOrder ID: {}\n",
            order.customer_name, order.service_name, order.id
        );
        if let Some(url) = &self.frontend_url {
            body.push_str(&format!(
                "\nYou can also download it at {}/orders/{}\n",
                url, order.id
            ));
        }
        body.push_str("\nThank you for using Paperdesk.\n");

        let content_type = ContentType::parse(attachment_content_type)
            .unwrap_or(ContentType::parse("application/octet-stream").map_err(|e| e.to_string())?);
        let attachment =
            Attachment::new(attachment_name.to_string()).body(attachment_data, content_type);

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(format!("Your {} order is ready", order.service_name))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body))
                    .singlepart(attachment),
            )
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        tracing::info!(order_id = %order.id, "Order result email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// EmailService::from_config returns None when email delivery is disabled.
    #[test]
    fn from_config_returns_none_when_email_disabled() {
        std::env::set_var("ENVIRONMENT", "development");
        std::env::set_var("DATABASE_URL", "postgresql://localhost/paperdesk_test");
        std::env::set_var("JWT_SECRET", "test-secret-key-min-32-characters-long");
        std::env::set_var("EMAIL_ENABLED", "false");
        let config = Config::from_env().expect("test config from env");
        assert!(
            EmailService::from_config(&config).is_none(),
            "When EMAIL_ENABLED=false, from_config should return None"
        );
    }
}
