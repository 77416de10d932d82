//! Status templates read from `statuses.json`.

use serde::{Deserialize, Serialize};

/// A reusable emoji/text pair addressable by identifier.
///
/// Both strings may contain `{{token}}` placeholders; `text` may span
/// several lines, each published as its own status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusTemplate {
    /// Unique identifier referenced by preset entries
    #[serde(rename = "status_id", default)]
    pub id: String,
    /// Emoji shown next to the text
    #[serde(rename = "status_emoji", default)]
    pub emoji: String,
    /// Status text, newline-separated sub-lines
    #[serde(rename = "status_text", default)]
    pub text: String,
    /// Free-form tags (not interpreted by the rotation loop)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StatusTemplate {
    /// Splits the text into the sub-lines published one after another.
    ///
    /// An empty text yields a single empty line.
    pub fn lines(&self) -> Vec<String> {
        self.text.split('\n').map(str::to_string).collect()
    }
}
