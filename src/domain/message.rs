//! Per-order chat message.

use serde::{Deserialize, Serialize};

/// One chat message inside an order.
///
/// Either `text` or `files_key` is present; attachments are referenced by
/// their upload-batch key, never inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_key: Option<String>,
    pub account: i64,
    /// Which side of the order the author sits on.
    pub account_position: String,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl Message {
    pub fn has_content(&self) -> bool {
        self.text.as_deref().map(|t| !t.is_empty()).unwrap_or(false)
            || self.files_key.is_some()
    }

    /// Display timestamp in the account's timezone, given its minute-level
    /// offset from UTC.
    pub fn display_date(&self, deviation_minutes: i64, format: &str) -> String {
        let shifted = self.date + chrono::Duration::minutes(deviation_minutes);
        shifted.format(format).to_string()
    }
}
