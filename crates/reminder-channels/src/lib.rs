//! # Reminder Channels
//! I/O collaborators of the reminder scheduler.
//!
//! - `email` — SMTP delivery (`MailTransport`)
//! - `cli` — interactive terminal prompt (`LineInput`)

pub mod cli;
pub mod email;

pub use cli::TerminalInput;
pub use email::SmtpMailer;
