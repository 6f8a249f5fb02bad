//! Error types for monthly-reminder.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Filesystem failures (other than a missing store, which is not an error).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the reminder store or config.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    /// SMTP message building or delivery failures.
    #[error("Mail error: {0}")]
    Mail(String),

    /// Bad user input caught before anything is written.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, ReminderError>;
