//! The signed-in account.

use serde::{Deserialize, Serialize};

/// Account record returned by the backend after a successful sign-in.
///
/// This is also the value persisted under [`crate::storage_keys::USER_KEY`],
/// so unknown optional fields must round-trip without loss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Backend identifier.
    pub id: i64,

    /// Full name as entered at registration.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// Login handle, when the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Profile label assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perfil: Option<String>,
}

impl User {
    /// Name shown in the header. Falls back to the username, then the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.username
            .as_deref()
            .filter(|username| !username.trim().is_empty())
            .unwrap_or(&self.email)
    }
}
