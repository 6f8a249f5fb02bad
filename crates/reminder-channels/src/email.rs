//! Email channel — async SMTP sending via lettre.
//!
//! Supports implicit TLS (`secure: true`, port 465) and STARTTLS (port 587),
//! with optional username/password authentication.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as LettreMessage, Tokio1Executor};
use reminder_core::config::SmtpConfig;
use reminder_core::error::{ReminderError, Result};
use reminder_core::traits::MailTransport;
use reminder_core::types::OutgoingMail;

/// SMTP mail transport.
pub struct SmtpMailer {
    host: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let relay = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        };
        let builder = relay.map_err(|e| ReminderError::Mail(format!("SMTP relay: {e}")))?;

        let mut builder = builder
            .port(config.port())
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if let Some(auth) = &config.auth {
            builder = builder.credentials(Credentials::new(auth.user.clone(), auth.pass.clone()));
        }

        tracing::debug!(
            "📧 SMTP transport ready: {}:{} (secure: {})",
            config.host,
            config.port(),
            config.secure
        );

        Ok(Self {
            host: config.host.clone(),
            mailer: builder.build(),
        })
    }
}

/// Turn an `OutgoingMail` into an HTML email.
pub fn build_message(mail: &OutgoingMail) -> Result<LettreMessage> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e| ReminderError::Mail(format!("Invalid from '{}': {e}", mail.from)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| ReminderError::Mail(format!("Invalid to '{}': {e}", mail.to)))?;

    LettreMessage::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())
        .map_err(|e| ReminderError::Mail(format!("Build email: {e}")))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let email = build_message(mail)?;
        self.mailer
            .send(email)
            .await
            .map_err(|e| ReminderError::Mail(format!("SMTP send via {}: {e}", self.host)))?;
        tracing::debug!("📤 Email sent to: {}", mail.to);
        Ok(())
    }
}
