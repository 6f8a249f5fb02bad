//! Plain data passed between the scheduler and its collaborators.

use serde::{Deserialize, Serialize};

/// A fully addressed email, ready for a `MailTransport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Result of a cancellable terminal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user typed a line (without the trailing newline).
    Answered(String),
    /// The process was suspended and resumed (Ctrl+Z, then `fg`); start over.
    Suspended,
    /// Ctrl+C; the caller should exit right away.
    Interrupted,
}
