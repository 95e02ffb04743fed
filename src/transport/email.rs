// Email transport - SMTP submission of rendered email requests

use crate::config::EmailSettings;
use crate::Result;
use async_trait::async_trait;
use lettre::message::header;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};

/// A fully rendered email send request, decoded from a notification
/// template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    #[serde(default)]
    pub text_body: String,
    #[serde(default)]
    pub html_body: Option<String>,
}

/// Outbound email delivery.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Send one rendered email request
    async fn send(&self, request: &EmailSendRequest) -> Result<()>;

    /// Test transport connectivity (optional)
    async fn test(&self) -> Result<()> {
        Ok(())
    }
}

/// SMTP-backed email transport
pub struct SmtpMailer {
    settings: EmailSettings,
}

impl SmtpMailer {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    /// Build the wire message from a rendered request
    fn build_message(&self, request: &EmailSendRequest) -> Result<Message> {
        let builder = Message::builder()
            .from(request.from.parse()?)
            .to(request.to.parse()?)
            .subject(request.subject.clone());

        let message = match &request.html_body {
            Some(html) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(request.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            )?,
            None => builder.singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(request.text_body.clone()),
            )?,
        };

        Ok(message)
    }

    fn get_transport(&self) -> Result<SmtpTransport> {
        let transport = if self.settings.use_starttls {
            SmtpTransport::starttls_relay(&self.settings.smtp_server)?
        } else {
            SmtpTransport::relay(&self.settings.smtp_server)?
        };

        let mut transport = transport.port(self.settings.smtp_port);
        if !self.settings.username.is_empty() {
            transport = transport.credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ));
        }

        Ok(transport.build())
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, request: &EmailSendRequest) -> Result<()> {
        let message = self.build_message(request)?;
        let transport = self.get_transport()?;

        // Send email (blocking operation, run in blocking task)
        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))
        })
        .await??;

        Ok(())
    }

    async fn test(&self) -> Result<()> {
        let transport = self.get_transport()?;

        tokio::task::spawn_blocking(move || {
            transport
                .test_connection()
                .map_err(|e| anyhow::anyhow!("SMTP connection test failed: {}", e))
        })
        .await??;

        Ok(())
    }
}
