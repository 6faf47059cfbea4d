//! Per-day click counters with hourly buckets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::domain::calendar::{HOUR_COLUMNS, HOURS_PER_DAY, HourOfDay, day_key, format_instant};

/// Click counters for one tracking identifier on one UTC day.
///
/// Created lazily by the first click of the day. `total` always equals the
/// sum of `hours`; [`DailyClickStats::record`] is the only mutator and keeps
/// both in step.
///
/// # JSON
///
/// ```json
/// {
///   "qrCodeId": "qr-1",
///   "dayIso": "2026-01-01",
///   "total": 7,
///   "regionCounts": { "US": 5, "DE": 2 },
///   "hour00": 2, "hour01": 0, "...": 0, "hour13": 5, "hour23": 0,
///   "lastAtIso": "2026-01-01T13:42:10Z",
///   "lastCountry": "US"
/// }
/// ```
///
/// `regionCounts`, `lastAtIso` and `lastCountry` are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyClickStats {
    pub qr_code_id: String,
    pub day: NaiveDate,
    pub total: i64,
    pub hours: [i64; HOURS_PER_DAY],
    pub region_counts: BTreeMap<String, i64>,
    pub last_at: Option<DateTime<Utc>>,
    pub last_country: Option<String>,
}

impl DailyClickStats {
    /// A zeroed bucket, ready for its first [`record`](Self::record).
    pub fn empty(qr_code_id: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            qr_code_id: qr_code_id.into(),
            day,
            total: 0,
            hours: [0; HOURS_PER_DAY],
            region_counts: BTreeMap::new(),
            last_at: None,
            last_country: None,
        }
    }

    /// Counts one click at `hour`, attributing it to `country` when present.
    ///
    /// Last-seen fields follow last-writer-wins by event timestamp, so a
    /// late-arriving older click never overwrites a newer one.
    pub fn record(&mut self, hour: HourOfDay, at: DateTime<Utc>, country: Option<&str>) {
        self.total += 1;
        self.hours[hour.index()] += 1;

        if let Some(country) = country {
            *self.region_counts.entry(country.to_string()).or_insert(0) += 1;
        }

        advance_last_seen(&mut self.last_at, &mut self.last_country, at, country);
    }

    /// Counter for a single hour.
    pub fn hour(&self, hour: HourOfDay) -> i64 {
        self.hours[hour.index()]
    }

    /// Sum of the hourly counters; equal to `total` for any consistent bucket.
    pub fn hours_sum(&self) -> i64 {
        self.hours.iter().sum()
    }
}

/// Applies last-writer-wins to a `(last_at, last_country)` pair.
///
/// The incoming click wins on ties, matching the durable store's `>=` rule.
pub(crate) fn advance_last_seen(
    last_at: &mut Option<DateTime<Utc>>,
    last_country: &mut Option<String>,
    at: DateTime<Utc>,
    country: Option<&str>,
) {
    if last_at.is_none_or(|prev| at >= prev) {
        *last_at = Some(at);
        *last_country = country.map(str::to_string);
    }
}

impl Serialize for DailyClickStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("qrCodeId", &self.qr_code_id)?;
        map.serialize_entry("dayIso", &day_key(self.day))?;
        map.serialize_entry("total", &self.total)?;

        if !self.region_counts.is_empty() {
            map.serialize_entry("regionCounts", &self.region_counts)?;
        }

        for (column, count) in HOUR_COLUMNS.iter().zip(self.hours.iter()) {
            map.serialize_entry(column, count)?;
        }

        if let Some(at) = self.last_at {
            map.serialize_entry("lastAtIso", &format_instant(at))?;
        }
        if let Some(country) = self.last_country.as_deref().filter(|c| !c.is_empty()) {
            map.serialize_entry("lastCountry", country)?;
        }

        map.end()
    }
}
