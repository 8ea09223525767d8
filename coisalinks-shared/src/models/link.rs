//! Short links and the bodies used to create and edit them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A shortened link owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Backend identifier used by `PUT /links/{id}`.
    pub id: i64,

    /// Destination the short code redirects to.
    pub original_url: String,

    /// Full short URL (or slug) served by the backend.
    pub shortened_url: String,

    /// Number of recorded visits.
    #[serde(default, alias = "click_count")]
    pub clicks: u64,

    /// Raw expiration timestamp, if the link expires.
    #[serde(default)]
    pub expiration_date: Option<String>,
}

impl Link {
    /// Expiration rendered as `dd/mm/yyyy`, or `None` when the link never
    /// expires. Values that do not parse as a date are returned verbatim.
    #[must_use]
    pub fn expiration_display(&self) -> Option<String> {
        self.expiration_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(format_expiration)
    }
}

fn format_expiration(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|value| DateTime::date_naive(&value))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|value| NaiveDateTime::date(&value))
        })
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Body of `POST /shorten/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenRequest {
    /// The URL exactly as the user typed it.
    pub url: String,
}

/// Body returned with `201 Created` by `POST /shorten/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    /// The newly created short URL.
    pub shortened_url: String,
}

/// Body of `PUT /links/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkUpdateRequest {
    /// New destination.
    pub original_url: String,

    /// New short URL or slug.
    pub shortened_url: String,
}
