//! Reminder definition — the only record kept in `reminders.json`.

use serde::{Deserialize, Serialize};

/// A recurring monthly email reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Display name, also used in logs.
    pub name: String,
    /// Target day of the month. Not checked against the month length.
    pub date: i32,
    /// Email subject. Empty means `Reminder: <name>`.
    #[serde(default)]
    pub subject: String,
    /// HTML email body. Empty means the built-in template.
    #[serde(default)]
    pub body: String,
    /// Weekend dates move to Monday when true, to Friday when false.
    #[serde(default = "default_true")]
    pub next_business_day: bool,
    /// Overrides `defaultRecipient` from the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Reminder {
    /// Create a reminder with the default subject and body filled in.
    pub fn new(name: &str, date: i32) -> Self {
        Self {
            name: name.to_string(),
            date,
            subject: default_subject(name),
            body: default_body(name),
            next_business_day: true,
            recipient: None,
        }
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn with_recipient(mut self, recipient: &str) -> Self {
        self.recipient = Some(recipient.to_string());
        self
    }

    /// Switch weekend handling to "previous business day".
    pub fn previous_business_day(mut self) -> Self {
        self.next_business_day = false;
        self
    }

    /// Subject line to send, falling back to `Reminder: <name>`.
    pub fn subject_line(&self) -> String {
        if self.subject.is_empty() {
            default_subject(&self.name)
        } else {
            self.subject.clone()
        }
    }

    /// HTML body to send, falling back to the built-in template.
    pub fn html_body(&self) -> String {
        if self.body.is_empty() {
            default_body(&self.name)
        } else {
            self.body.clone()
        }
    }
}

fn default_subject(name: &str) -> String {
    format!("Reminder: {name}")
}

/// Built-in HTML body used when neither `--body` nor `--file` is given.
pub fn default_body(name: &str) -> String {
    format!(
        r#"<h1 align="center">{name}</h1>
<h2 align="center">You Have Been Reminded</h2>
<hr />
<br />
<br />
Reminder: <strong>{name}</strong>
<br />
<br />
<em>Yours truly :),
<br />
Reminder Bot</em>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_defaults() {
        let r = Reminder::new("Rent", 21);
        assert_eq!(r.subject, "Reminder: Rent");
        assert!(r.body.contains("<strong>Rent</strong>"));
        assert!(r.next_business_day);
        assert!(r.recipient.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let r = Reminder::new("Bills", 15)
            .with_subject("Pay bills")
            .with_body("<h1>Pay</h1>")
            .previous_business_day();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["name"], "Bills");
        assert_eq!(json["date"], 15);
        assert_eq!(json["subject"], "Pay bills");
        assert_eq!(json["body"], "<h1>Pay</h1>");
        assert_eq!(json["nextBusinessDay"], false);
        // Absent recipient is not written at all
        assert!(json.get("recipient").is_none());

        let with_rec = r.with_recipient("someone@example.com");
        let json = serde_json::to_value(&with_rec).unwrap();
        assert_eq!(json["recipient"], "someone@example.com");
    }

    #[test]
    fn test_minimal_document_gets_defaults() {
        let r: Reminder = serde_json::from_str(r#"{ "name": "Tax", "date": 3 }"#).unwrap();
        assert!(r.next_business_day);
        assert_eq!(r.subject_line(), "Reminder: Tax");
        assert!(r.html_body().contains("You Have Been Reminded"));
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let parsed: Result<Reminder, _> = serde_json::from_str(r#"{ "name": "Tax" }"#);
        assert!(parsed.is_err());
    }
}
