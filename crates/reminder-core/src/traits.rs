//! Seams between the reminder logic and the outside world.
//! Production implementations live in `reminder-channels`; tests use fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{OutgoingMail, PromptOutcome};

/// Delivers one email. Timeouts are the implementation's business.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Short name for logs ("smtp", "fake", ...).
    fn name(&self) -> &str;

    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Line-based user input that can be abandoned mid-question.
#[async_trait]
pub trait LineInput: Send {
    async fn ask(&mut self, question: &str) -> Result<PromptOutcome>;
}
