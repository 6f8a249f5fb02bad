//! # Reminder Core
//! Shared building blocks for the monthly-reminder workspace.
//!
//! - `config` — `config.json` / `config.toml` loading (recipient, SMTP, pacing)
//! - `error` — the workspace-wide error type
//! - `traits` — seams to the outside world (mail transport, line input)
//! - `types` — plain data passed across those seams

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{AppConfig, Pacing, SmtpAuth, SmtpConfig};
pub use error::{ReminderError, Result};
pub use traits::{LineInput, MailTransport};
pub use types::{OutgoingMail, PromptOutcome};
