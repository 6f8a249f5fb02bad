//! File-based reminder store.
//! Reminders are kept as one pretty-printed JSON array — human-readable and
//! easy to edit by hand. The file is read and rewritten whole on every change.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reminder_core::config::AppConfig;
use reminder_core::error::{ReminderError, Result};

use crate::reminder::Reminder;

/// JSON file holding every reminder in display order.
pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Default store path (~/.monthly-reminder/reminders.json).
    pub fn default_path() -> PathBuf {
        AppConfig::home_dir().join("reminders.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load reminders from disk. A missing file is an empty store;
    /// a malformed one is an error.
    pub fn load(&self) -> Result<Vec<Reminder>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No store at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let reminders: Vec<Reminder> = serde_json::from_str(&json).map_err(|e| {
            ReminderError::Store(format!("Failed to parse {}: {e}", self.path.display()))
        })?;
        Ok(reminders)
    }

    /// Save all reminders: 2-space indentation and a trailing newline.
    pub fn save(&self, reminders: &[Reminder]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut json = serde_json::to_string_pretty(reminders)?;
        json.push('\n');
        std::fs::write(&self.path, json)?;
        tracing::debug!("💾 Saved {} reminders to {}", reminders.len(), self.path.display());
        Ok(())
    }

    /// Append one reminder at the end of the list.
    pub fn append(&self, reminder: Reminder) -> Result<()> {
        let mut reminders = self.load()?;
        tracing::info!("📅 Reminder added: '{}' (day {})", reminder.name, reminder.date);
        reminders.push(reminder);
        self.save(&reminders)
    }
}

/// Parse a comma-separated list of 1-based positions, e.g. `"1, 3,7"`.
/// Anything that is not a positive integer is dropped.
pub fn parse_selection(answer: &str) -> Vec<usize> {
    answer
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|&index| index > 0)
        .collect()
}

/// Drop the reminders at the given 1-based positions, keeping the rest in order.
/// Positions past the end are ignored.
pub fn remove_positions(reminders: Vec<Reminder>, positions: &[usize]) -> Vec<Reminder> {
    let selected: HashSet<usize> = positions.iter().copied().collect();
    reminders
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !selected.contains(&(i + 1)))
        .map(|(_, r)| r)
        .collect()
}
