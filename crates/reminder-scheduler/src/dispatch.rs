//! Reminder dispatch — sends one email per due reminder.
//!
//! Sends are strictly sequential with a pause between them to stay under
//! provider rate limits. A failed send is logged and skipped; it is not
//! retried in this run, and the next run (tomorrow) no longer sees it as due.

use std::time::Duration;

use reminder_core::config::{AppConfig, Pacing};
use reminder_core::traits::MailTransport;
use reminder_core::types::OutgoingMail;

use crate::reminder::Reminder;

/// Addressing and pacing for one dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// `From:` mailbox.
    pub from: String,
    pub default_recipient: String,
    pub pacing: Pacing,
}

impl DispatchSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            from: config.sender(),
            default_recipient: config.default_recipient.clone(),
            pacing: config.pacing.clone(),
        }
    }
}

/// What happened to one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed(String),
}

/// Per-reminder outcomes and the pauses taken, in order.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub results: Vec<(String, SendOutcome)>,
    pub pauses: Vec<Duration>,
}

impl DispatchReport {
    pub fn sent_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| *outcome == SendOutcome::Sent)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.sent_count()
    }
}

/// Build the email for a reminder.
pub fn build_mail(reminder: &Reminder, settings: &DispatchSettings) -> OutgoingMail {
    let to = reminder
        .recipient
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(&settings.default_recipient);
    OutgoingMail {
        from: settings.from.clone(),
        to: to.to_string(),
        subject: reminder.subject_line(),
        html: reminder.html_body(),
    }
}

/// Send every due reminder through `transport`, in order.
pub async fn dispatch(
    due: &[Reminder],
    transport: &dyn MailTransport,
    settings: &DispatchSettings,
) -> DispatchReport {
    let mut report = DispatchReport::default();
    if due.is_empty() {
        return report;
    }

    tracing::info!("📬 Processing email queue ({} reminders via {})", due.len(), transport.name());

    for (i, reminder) in due.iter().enumerate() {
        let mail = build_mail(reminder, settings);
        tracing::info!("📤 Sending reminder: {} → {}", reminder.name, mail.to);

        match transport.send(&mail).await {
            Ok(()) => {
                tracing::info!("✅ Reminder is sent: {}", reminder.name);
                report.results.push((reminder.name.clone(), SendOutcome::Sent));

                if i + 1 < due.len() {
                    let wait = settings.pacing.next_delay();
                    tracing::info!(
                        "⏳ Waiting {} seconds before sending the next email...",
                        wait.as_millis().div_ceil(1000)
                    );
                    tokio::time::sleep(wait).await;
                    report.pauses.push(wait);
                }
            }
            Err(e) => {
                tracing::error!("❌ Failed to send reminder: {}: {e}", reminder.name);
                report
                    .results
                    .push((reminder.name.clone(), SendOutcome::Failed(e.to_string())));
            }
        }
    }

    tracing::info!(
        "📭 Email queue done: {} sent, {} failed",
        report.sent_count(),
        report.failed_count()
    );
    report
}
