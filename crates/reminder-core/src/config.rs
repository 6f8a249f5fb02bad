//! Monthly-reminder configuration system.
//!
//! Read once per `exec` invocation from `~/.monthly-reminder/config.json`
//! (or any path passed with `--config`). Files ending in `.toml` are parsed
//! as TOML, everything else as JSON.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ReminderError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Fallback address for reminders without their own `recipient`.
    pub default_recipient: String,
    /// Bot identity used in the `From:` header.
    #[serde(default)]
    pub from: Option<String>,
    /// SMTP connection settings. `nodemailer` is accepted for older config files.
    #[serde(default, alias = "nodemailer")]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub pacing: Pacing,
}

impl AppConfig {
    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReminderError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config: Self = if is_toml {
            toml::from_str(&content)
                .map_err(|e| ReminderError::Config(format!("Failed to parse config: {e}")))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| ReminderError::Config(format!("Failed to parse config: {e}")))?
        };
        config.validate()?;
        tracing::debug!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_recipient.trim().is_empty() {
            return Err(ReminderError::Config("defaultRecipient must not be empty".into()));
        }
        Ok(())
    }

    /// The `From:` mailbox for outgoing reminders.
    pub fn sender(&self) -> String {
        if let Some(from) = &self.from {
            return from.clone();
        }
        match &self.smtp.auth {
            Some(auth) if !auth.user.is_empty() => format!("Reminder Bot <{}>", auth.user),
            _ => "Reminder Bot <reminder-bot@localhost>".into(),
        }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.json")
    }

    /// Get the monthly-reminder home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".monthly-reminder")
    }
}

/// Expand `~` in user-supplied paths.
pub fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

/// SMTP transport settings. Field names follow the nodemailer transport shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// Implicit TLS when true, STARTTLS otherwise.
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub auth: Option<SmtpAuth>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "localhost".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl SmtpConfig {
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None if self.secure => 465,
            None => 587,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: None,
            secure: false,
            auth: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpAuth {
    pub user: String,
    pub pass: String,
}

/// Delay inserted between two consecutive successful sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Pacing {
    /// Always wait the same amount of time.
    Fixed { millis: u64 },
    /// Wait a uniformly random time in `[min_millis, max_millis]`.
    Random {
        #[serde(rename = "minMillis")]
        min_millis: u64,
        #[serde(rename = "maxMillis")]
        max_millis: u64,
    },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Random {
            min_millis: 1_000,
            max_millis: 56_000,
        }
    }
}

impl Pacing {
    /// Pick the next pause.
    pub fn next_delay(&self) -> Duration {
        match *self {
            Pacing::Fixed { millis } => Duration::from_millis(millis),
            Pacing::Random {
                min_millis,
                max_millis,
            } => {
                if max_millis <= min_millis {
                    return Duration::from_millis(min_millis);
                }
                let millis = rand::thread_rng().gen_range(min_millis..=max_millis);
                Duration::from_millis(millis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.json",
            r#"{
                "defaultRecipient": "me@example.com",
                "smtp": {
                    "host": "smtp.example.com",
                    "secure": true,
                    "auth": { "user": "bot@example.com", "pass": "hunter2" }
                },
                "pacing": { "mode": "fixed", "millis": 250 }
            }"#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_recipient, "me@example.com");
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port(), 465);
        assert_eq!(config.smtp.timeout_secs, 30);
        assert_eq!(config.pacing, Pacing::Fixed { millis: 250 });
        assert_eq!(config.sender(), "Reminder Bot <bot@example.com>");
    }

    #[test]
    fn test_nodemailer_key_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.json",
            r#"{
                "defaultRecipient": "me@example.com",
                "nodemailer": { "host": "mail.example.com", "port": 2525 }
            }"#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.smtp.host, "mail.example.com");
        assert_eq!(config.smtp.port(), 2525);
        assert!(!config.smtp.secure);
        assert_eq!(config.pacing, Pacing::default());
        assert_eq!(config.sender(), "Reminder Bot <reminder-bot@localhost>");
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.toml",
            r#"
defaultRecipient = "me@example.com"
from = "Bills <bills@example.com>"

[smtp]
host = "smtp.example.com"

[pacing]
mode = "random"
minMillis = 10
maxMillis = 20
"#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.smtp.port(), 587);
        assert_eq!(config.sender(), "Bills <bills@example.com>");
        assert_eq!(
            config.pacing,
            Pacing::Random {
                min_millis: 10,
                max_millis: 20
            }
        );
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ReminderError::Config(_)));
    }

    #[test]
    fn test_empty_recipient_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "config.json", r#"{ "defaultRecipient": " " }"#);
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_random_pacing_stays_in_bounds() {
        let pacing = Pacing::Random {
            min_millis: 5,
            max_millis: 9,
        };
        for _ in 0..50 {
            let d = pacing.next_delay();
            assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(9));
        }
        let inverted = Pacing::Random {
            min_millis: 7,
            max_millis: 3,
        };
        assert_eq!(inverted.next_delay(), Duration::from_millis(7));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/reminders.json");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert_eq!(expand_path("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
    }
}
