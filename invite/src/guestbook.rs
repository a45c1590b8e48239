//! # Guestbook
//!
//! Wishes are written through a public form and read back from a sheet dump.
//!
//! The dump is `{ "GoogleSheetData": [[header...], [row...], ...] }`. Columns
//! are located by header text, since form-backed sheets put a timestamp first
//! and name the other columns after the form questions.
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::records::GuestbookMessage;

pub const NAME_ENTRY: &str = "entry.405401269";
pub const MESSAGE_ENTRY: &str = "entry.893740636";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuestbookError {
    #[error("Guestbook sheet has no {0} column")]
    MissingColumn(&'static str),

    #[error("Name and message are required")]
    Blank,
}

#[derive(Debug, Deserialize)]
pub struct SheetDump {
    #[serde(rename = "GoogleSheetData", default)]
    pub rows: Vec<Vec<Value>>,
}

/// Form field ids of the guestbook form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub message: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: NAME_ENTRY.to_string(),
            message: MESSAGE_ENTRY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuestbookPost {
    pub name: String,
    pub message: String,
}

impl GuestbookPost {
    pub fn validated(self) -> Result<Self, GuestbookError> {
        let name = self.name.trim();
        let message = self.message.trim();

        if name.is_empty() || message.is_empty() {
            return Err(GuestbookError::Blank);
        }

        Ok(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    pub fn form_body<'a>(&'a self, fields: &'a FormFields) -> [(&'a str, &'a str); 2] {
        [
            (fields.name.as_str(), self.name.as_str()),
            (fields.message.as_str(), self.message.as_str()),
        ]
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn column(header: &[Value], needle: &'static str) -> Result<usize, GuestbookError> {
    header
        .iter()
        .position(|title| cell(title).to_lowercase().contains(needle))
        .ok_or(GuestbookError::MissingColumn(needle))
}

/// Messages newest-first. Rows too short to hold every column are skipped.
pub fn parse_guestbook(dump: SheetDump) -> Result<Vec<GuestbookMessage>, GuestbookError> {
    let mut rows = dump.rows.into_iter();

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let name = column(&header, "name")?;
    let message = column(&header, "message")?;
    let timestamp = column(&header, "timestamp")?;
    let width = name.max(message).max(timestamp);

    let mut messages: Vec<GuestbookMessage> = rows
        .enumerate()
        .filter_map(|(index, row)| {
            if row.len() <= width {
                warn!("Skipping guestbook row {index}: {} cells", row.len());
                return None;
            }

            Some(GuestbookMessage {
                timestamp: cell(&row[timestamp]),
                name: cell(&row[name]),
                message: cell(&row[message]),
            })
        })
        .collect();

    messages.reverse();
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dump(value: Value) -> SheetDump {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_newest_first() {
        let messages = parse_guestbook(dump(json!({
            "GoogleSheetData": [
                ["Timestamp", "Your Name", "Message for the couple"],
                ["2025-12-01T10:00:00.000Z", "Noah", "Congrats!"],
                ["2025-12-02T10:00:00.000Z", "Thea", "Best wishes"],
            ]
        })))
        .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].name, "Thea");
        assert_eq!(messages[1].timestamp, "2025-12-01T10:00:00.000Z");
    }

    #[test]
    fn test_short_rows_skipped() {
        let messages = parse_guestbook(dump(json!({
            "GoogleSheetData": [
                ["Timestamp", "Name", "Message"],
                ["2025-12-01T10:00:00.000Z", "Noah"],
                ["2025-12-02T10:00:00.000Z", "Thea", 42],
            ]
        })))
        .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "42");
    }

    #[test]
    fn test_missing_column() {
        let result = parse_guestbook(dump(json!({ "GoogleSheetData": [["Timestamp", "Name"]] })));

        assert_eq!(result, Err(GuestbookError::MissingColumn("message")));
        assert_eq!(parse_guestbook(dump(json!({}))), Ok(Vec::new()));
    }

    #[test]
    fn test_post_validation() {
        let blank = GuestbookPost {
            name: "Noah".to_string(),
            message: "   ".to_string(),
        };
        assert_eq!(blank.validated(), Err(GuestbookError::Blank));

        let post = GuestbookPost {
            name: " Noah ".to_string(),
            message: "Congrats!".to_string(),
        }
        .validated()
        .unwrap();
        let fields = FormFields::default();

        assert_eq!(
            post.form_body(&fields),
            [(NAME_ENTRY, "Noah"), (MESSAGE_ENTRY, "Congrats!")]
        );
    }
}
