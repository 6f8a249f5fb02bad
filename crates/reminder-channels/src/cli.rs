//! Terminal prompt — reads answers from stdin, gives up on suspend/interrupt.
//!
//! Stdin is drained by a single detached thread into a channel, so a prompt
//! that is abandoned (Ctrl+Z then `fg`) leaves no half-finished read behind and
//! the next prompt gets the next line. A plain thread is used rather than
//! `tokio::io::stdin`, whose pending read would hold up runtime shutdown.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use reminder_core::error::{ReminderError, Result};
use reminder_core::traits::LineInput;
use reminder_core::types::PromptOutcome;
use tokio::sync::mpsc;

/// One signal the prompt listens for.
struct SignalWait {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
    #[cfg(not(unix))]
    ctrl_c: bool,
}

impl SignalWait {
    #[cfg(unix)]
    fn listen(kind: tokio::signal::unix::SignalKind, label: &str) -> Result<Self> {
        let signal = tokio::signal::unix::signal(kind)
            .map_err(|e| ReminderError::Prompt(format!("{label} handler: {e}")))?;
        Ok(Self { signal })
    }

    /// Ctrl+C.
    fn interrupt() -> Result<Self> {
        #[cfg(unix)]
        {
            Self::listen(tokio::signal::unix::SignalKind::interrupt(), "SIGINT")
        }
        #[cfg(not(unix))]
        {
            Ok(Self { ctrl_c: true })
        }
    }

    /// Brought back to the foreground after Ctrl+Z. Never fires off unix.
    fn resume() -> Result<Self> {
        #[cfg(unix)]
        {
            Self::listen(tokio::signal::unix::SignalKind::from_raw(libc::SIGCONT), "SIGCONT")
        }
        #[cfg(not(unix))]
        {
            Ok(Self { ctrl_c: false })
        }
    }

    async fn wait(&mut self) {
        #[cfg(unix)]
        {
            if self.signal.recv().await.is_some() {
                return;
            }
        }
        #[cfg(not(unix))]
        {
            if self.ctrl_c && tokio::signal::ctrl_c().await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}


/// Interactive stdin/stdout prompt.
pub struct TerminalInput {
    lines: mpsc::Receiver<String>,
    interrupt: SignalWait,
    resume: SignalWait,
}

impl TerminalInput {
    /// Start the stdin reader and install the signal handlers.
    /// Must be called inside a tokio runtime (signal registration needs one).
    pub fn new() -> Result<Self> {
        let interrupt = SignalWait::interrupt()?;
        let resume = SignalWait::resume()?;

        let (tx, rx) = mpsc::channel(16);
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            lines: rx,
            interrupt,
            resume,
        })
    }
}

#[async_trait]
impl LineInput for TerminalInput {
    async fn ask(&mut self, question: &str) -> Result<PromptOutcome> {
        {
            let mut out = std::io::stdout().lock();
            writeln!(out)?;
            write!(out, "{question}")?;
            out.flush()?;
        }

        let outcome = tokio::select! {
            // EOF (Ctrl+D) answers with nothing
            line = self.lines.recv() => PromptOutcome::Answered(line.unwrap_or_default()),
            _ = self.resume.wait() => {
                tracing::debug!("Prompt abandoned after resume");
                PromptOutcome::Suspended
            }
            _ = self.interrupt.wait() => {
                println!();
                PromptOutcome::Interrupted
            }
        };
        Ok(outcome)
    }
}
