//! Command handlers behind the CLI: add, list, delete, exec.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use reminder_core::config::AppConfig;
use reminder_core::error::{ReminderError, Result};
use reminder_core::traits::{LineInput, MailTransport};
use reminder_core::types::PromptOutcome;
use reminder_scheduler::{
    DispatchReport, DispatchSettings, Reminder, ReminderStore, dispatch, due_today,
    parse_selection, remove_positions,
};

/// Options of the `add` command.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Reminder name
    #[arg(short, long)]
    pub name: String,

    /// Target day of the month (1-31)
    #[arg(short, long, allow_negative_numbers = true)]
    pub date: i32,

    /// Email subject [default: "Reminder: <name>"]
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Message body (HTML)
    #[arg(short, long, conflicts_with = "file")]
    pub body: Option<String>,

    /// Read the message body from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// When <date> is not a weekday, trigger the reminder on the next business day. This is the default.
    #[arg(long, visible_alias = "nbd", conflicts_with = "previous_business_day")]
    pub next_business_day: bool,

    /// When <date> is not a weekday, trigger the reminder on the previous business day.
    #[arg(long, visible_alias = "pbd")]
    pub previous_business_day: bool,

    /// Recipient of the reminder email. Falls back to defaultRecipient from the config.
    #[arg(short, long, visible_alias = "rec")]
    pub recipient: Option<String>,
}

/// How the interactive delete ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// This many reminders were removed.
    Deleted(usize),
    /// The answer selected nothing; the store was not touched.
    Unchanged,
    NoReminders,
    /// Ctrl+C at the prompt.
    Interrupted,
}

fn validate(args: &AddArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        return Err(ReminderError::Validation("name must not be empty".into()));
    }
    if !(1..=31).contains(&args.date) {
        return Err(ReminderError::Validation(format!(
            "date must be between 1 and 31, got {}",
            args.date
        )));
    }
    Ok(())
}

/// Append a new reminder. `show_help` prints the `add` usage when the
/// arguments are rejected; nothing is written in that case.
pub fn add(store: &ReminderStore, args: &AddArgs, show_help: &dyn Fn()) -> Result<Reminder> {
    if let Err(e) = validate(args) {
        show_help();
        return Err(e);
    }

    let mut reminder = Reminder::new(&args.name, args.date);
    if let Some(subject) = &args.subject {
        reminder = reminder.with_subject(subject);
    }
    if let Some(body) = &args.body {
        reminder = reminder.with_body(body);
    } else if let Some(file) = &args.file {
        let body = std::fs::read_to_string(file).map_err(|e| {
            ReminderError::Validation(format!("Failed to read body file {}: {e}", file.display()))
        })?;
        reminder = reminder.with_body(&body);
    }
    if args.previous_business_day {
        reminder = reminder.previous_business_day();
    }
    if let Some(recipient) = &args.recipient {
        reminder = reminder.with_recipient(recipient);
    }

    store.append(reminder.clone())?;
    Ok(reminder)
}

/// Numbered listing, indexes right-aligned to the widest one.
pub fn format_listing(reminders: &[Reminder]) -> String {
    let width = reminders.len().to_string().len();
    let mut out = String::from("List of reminders:\n\n");
    for (i, reminder) in reminders.iter().enumerate() {
        out.push_str(&format!("  {:>width$})  {}\n", i + 1, reminder.name));
    }
    out
}

pub fn list(store: &ReminderStore, out: &mut dyn Write) -> Result<()> {
    let reminders = store.load()?;
    if reminders.is_empty() {
        writeln!(out, "There are no reminders.")?;
    } else {
        write!(out, "{}", format_listing(&reminders))?;
    }
    Ok(())
}

/// List, ask which positions to remove, rewrite the store.
/// A suspended prompt starts the whole flow over with a fresh listing.
pub async fn delete(
    store: &ReminderStore,
    input: &mut dyn LineInput,
    out: &mut dyn Write,
) -> Result<DeleteOutcome> {
    loop {
        let reminders = store.load()?;
        if reminders.is_empty() {
            writeln!(out, "There are no reminders.")?;
            return Ok(DeleteOutcome::NoReminders);
        }
        write!(out, "{}", format_listing(&reminders))?;
        out.flush()?;

        let answer = match input
            .ask("Choose which reminder(s) to delete (comma-separated): ")
            .await?
        {
            PromptOutcome::Answered(answer) => answer,
            PromptOutcome::Suspended => continue,
            PromptOutcome::Interrupted => return Ok(DeleteOutcome::Interrupted),
        };

        let positions = parse_selection(&answer);
        if positions.is_empty() {
            return Ok(DeleteOutcome::Unchanged);
        }
        let before = reminders.len();
        let remaining = remove_positions(reminders, &positions);
        let removed = before - remaining.len();
        store.save(&remaining)?;
        tracing::info!("🗑️ Deleted {} reminder(s)", removed);
        return Ok(DeleteOutcome::Deleted(removed));
    }
}

/// Send today's reminders. `connect` is only called when something is due.
/// Returns `None` when nothing was due.
pub async fn exec<F>(
    store: &ReminderStore,
    config: &AppConfig,
    today: NaiveDate,
    connect: F,
) -> Result<Option<DispatchReport>>
where
    F: FnOnce(&AppConfig) -> Result<Box<dyn MailTransport>>,
{
    let reminders = store.load()?;
    let due = due_today(&reminders, today);
    if due.is_empty() {
        tracing::info!("There are no reminders due today ({today}).");
        return Ok(None);
    }

    let transport = connect(config)?;
    let settings = DispatchSettings::from_config(config);
    Ok(Some(dispatch(&due, transport.as_ref(), &settings).await))
}
