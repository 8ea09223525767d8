//! Message text carried by backend replies.

use serde::{Deserialize, Serialize};

/// Optional human-readable text carried by backend responses.
///
/// Success bodies of the recovery endpoints use `message`; error bodies may use
/// `message`, `detail` or `error` depending on the handler. Nothing else in
/// the body is interpreted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiMessage {
    /// Primary message field.
    #[serde(default)]
    pub message: Option<String>,
    /// Framework-style error detail.
    #[serde(default)]
    pub detail: Option<String>,
    /// Alternate error field.
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// Parses a response body, yielding an empty message for anything that is
    /// not a JSON object.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Returns the first non-blank text field.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        [&self.message, &self.detail, &self.error]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|text| !text.trim().is_empty())
    }

    /// Owned variant of [`ApiMessage::text`].
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        self.text().map(ToString::to_string)
    }
}

impl std::fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text().unwrap_or_default())
    }
}
