//! Due-date evaluation.
//!
//! A reminder targets a day of the month. If that day falls on a weekend it
//! moves to the next (Monday) or previous (Friday) business day. A reminder is
//! due when the adjusted date has the same month and day as `today`; the year
//! is never compared.
//!
//! Days past the end of the month roll into the next month the way plain date
//! arithmetic does (the 31st of a 30-day month is the 1st of the next one), so
//! such a reminder does not fire in the short month at all.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::reminder::Reminder;

/// Which way a weekend date was moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Moved forward to Monday.
    NextBusinessDay,
    /// Moved back to Friday.
    PreviousBusinessDay,
}

/// A weekend adjustment applied to a reminder's target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// Weekday the unadjusted target landed on (Saturday or Sunday).
    pub weekday: Weekday,
    pub direction: Direction,
    /// Date before the shift.
    pub from: NaiveDate,
    /// Date after the shift.
    pub to: NaiveDate,
}

/// Full result of checking one reminder against one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub due: bool,
    /// Adjusted target date, `None` only when it is outside chrono's range.
    pub target: Option<NaiveDate>,
    pub adjustment: Option<Adjustment>,
}

/// Day `day` of `today`'s month, with overflow rolling into neighbouring months.
pub fn target_date(day: i32, today: NaiveDate) -> Option<NaiveDate> {
    let first = today.with_day(1)?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// Move a weekend date to a business day.
fn adjust(date: NaiveDate, next_business_day: bool) -> Option<Adjustment> {
    let weekday = date.weekday();
    let (direction, offset) = match (weekday, next_business_day) {
        (Weekday::Sat, true) => (Direction::NextBusinessDay, 2),
        (Weekday::Sat, false) => (Direction::PreviousBusinessDay, -1),
        (Weekday::Sun, true) => (Direction::NextBusinessDay, 1),
        (Weekday::Sun, false) => (Direction::PreviousBusinessDay, -2),
        _ => return None,
    };
    let to = date.checked_add_signed(Duration::days(offset))?;
    Some(Adjustment {
        weekday,
        direction,
        from: date,
        to,
    })
}

/// Check a reminder against `today` and report any weekend adjustment.
pub fn evaluate(reminder: &Reminder, today: NaiveDate) -> Evaluation {
    let Some(candidate) = target_date(reminder.date, today) else {
        return Evaluation {
            due: false,
            target: None,
            adjustment: None,
        };
    };

    let adjustment = adjust(candidate, reminder.next_business_day);
    let target = adjustment.map_or(candidate, |a| a.to);
    let due = target.month() == today.month() && target.day() == today.day();

    Evaluation {
        due,
        target: Some(target),
        adjustment,
    }
}

/// Whether `reminder` fires on `today`.
///
/// Weekend adjustments are logged; they never change the answer.
pub fn is_due(reminder: &Reminder, today: NaiveDate) -> bool {
    let eval = evaluate(reminder, today);
    if let Some(adj) = eval.adjustment {
        let day_name = match adj.weekday {
            Weekday::Sat => "Saturday",
            _ => "Sunday",
        };
        let which = match adj.direction {
            Direction::NextBusinessDay => "next",
            Direction::PreviousBusinessDay => "previous",
        };
        if eval.due {
            tracing::info!(
                "📅 {}'s date ({}) falls on a {} and the {} business day is today, queued",
                reminder.name,
                reminder.date,
                day_name,
                which
            );
        } else {
            tracing::debug!(
                "{}'s date ({}) falls on a {}, moved to the {} business day {}",
                reminder.name,
                reminder.date,
                day_name,
                which,
                adj.to
            );
        }
    }
    eval.due
}

/// The reminders that fire on `today`, in their original order.
pub fn due_today(reminders: &[Reminder], today: NaiveDate) -> Vec<Reminder> {
    reminders
        .iter()
        .filter(|r| is_due(r, today))
        .cloned()
        .collect()
}
