//! Cumulative click summary for a tracking identifier.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::daily_stats::advance_last_seen;
use crate::domain::calendar::format_instant;

/// All-time click summary for one tracking identifier.
///
/// `total` equals the sum of every daily bucket's total for the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    pub qr_code_id: String,
    pub total: i64,
    #[serde(
        rename = "lastAtIso",
        serialize_with = "serialize_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_country: Option<String>,
}

impl ClickStats {
    /// A summary with no clicks yet.
    pub fn empty(qr_code_id: impl Into<String>) -> Self {
        Self {
            qr_code_id: qr_code_id.into(),
            total: 0,
            last_at: None,
            last_country: None,
        }
    }

    /// Counts one click; last-seen fields follow last-writer-wins.
    pub fn record(&mut self, at: DateTime<Utc>, country: Option<&str>) {
        self.total += 1;
        advance_last_seen(&mut self.last_at, &mut self.last_country, at, country);
    }
}

fn serialize_instant<S: Serializer>(
    at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serializer.serialize_str(&format_instant(*at)),
        None => serializer.serialize_none(),
    }
}
