//! # Reminder Scheduler
//!
//! Decides which monthly reminders fire today and sends them, one at a time.
//!
//! ## Architecture
//! ```text
//! ReminderStore (reminders.json)
//!   └── Vec<Reminder>
//!         └── due::due_today(today)       weekend → next/previous business day
//!               └── dispatch::dispatch()  one email per reminder, paced
//!                     └── MailTransport   (SMTP in reminder-channels)
//! ```

pub mod dispatch;
pub mod due;
pub mod reminder;
pub mod store;

pub use dispatch::{DispatchReport, DispatchSettings, SendOutcome, dispatch};
pub use due::{Adjustment, Direction, Evaluation, due_today, evaluate, is_due};
pub use reminder::Reminder;
pub use store::{ReminderStore, parse_selection, remove_positions};
