//! Click event model for fire-and-forget click recording.

use chrono::{DateTime, Utc};

/// A single tracked redirect, captured at the moment the redirect is issued.
///
/// Built by the redirect handler from the resolved destination and request
/// headers, then handed to [`crate::domain::click_recorder::ClickRecorder`]
/// for recording. The redirect response never waits on it.
///
/// All client metadata is optional; blank header values are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Instant of the redirect (UTC).
    pub at: DateTime<Utc>,
    pub qr_code_id: String,
    pub target_url: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Two-letter region code reported by a CDN/proxy header.
    pub country: Option<String>,
    pub request_id: Option<String>,
    pub accept_language: Option<String>,
}

impl ClickEvent {
    /// Creates an event with no client metadata.
    ///
    /// Use struct update syntax to fill in the optional fields:
    ///
    /// ```ignore
    /// let event = ClickEvent {
    ///     country: Some("US".to_string()),
    ///     ..ClickEvent::new("qr-1", "https://example.com", Utc::now())
    /// };
    /// ```
    pub fn new(
        qr_code_id: impl Into<String>,
        target_url: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            at,
            qr_code_id: qr_code_id.into(),
            target_url: target_url.into(),
            ip: None,
            user_agent: None,
            referer: None,
            country: None,
            request_id: None,
            accept_language: None,
        }
    }

    /// The country code to attribute this click to, if a non-blank one is set.
    pub fn country_code(&self) -> Option<&str> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
