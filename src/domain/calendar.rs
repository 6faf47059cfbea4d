//! UTC calendar helpers shared by both click stores and the query API.
//!
//! All bucketing happens in UTC: an event belongs to the day obtained by
//! truncating its timestamp to UTC midnight, and to the hour `0..=23` of that
//! timestamp. Days are exchanged as [`NaiveDate`] values and rendered as
//! `YYYY-MM-DD` keys.

use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};

/// Number of hourly buckets per day.
pub const HOURS_PER_DAY: usize = 24;

/// Column / JSON field name for each hourly counter, indexed by hour.
pub const HOUR_COLUMNS: [&str; HOURS_PER_DAY] = [
    "hour00", "hour01", "hour02", "hour03", "hour04", "hour05", "hour06", "hour07", "hour08",
    "hour09", "hour10", "hour11", "hour12", "hour13", "hour14", "hour15", "hour16", "hour17",
    "hour18", "hour19", "hour20", "hour21", "hour22", "hour23",
];

const DAY_FORMAT: &str = "%Y-%m-%d";

/// An hour of the UTC day, guaranteed to be within `0..=23`.
///
/// Stores only accept hours through this type, so an out-of-range hour is
/// rejected once, before any counter is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourOfDay(u8);

impl HourOfDay {
    /// Returns `None` when `hour` is outside `0..=23`.
    pub fn new(hour: u32) -> Option<Self> {
        u8::try_from(hour)
            .ok()
            .filter(|h| usize::from(*h) < HOURS_PER_DAY)
            .map(Self)
    }

    /// The UTC hour of a timestamp.
    pub fn of(at: DateTime<Utc>) -> Self {
        // chrono guarantees hour() < 24
        Self(at.hour() as u8)
    }

    /// Index into a `[_; HOURS_PER_DAY]` array.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Storage column name for this hour (`hour00` .. `hour23`).
    pub fn column(self) -> &'static str {
        HOUR_COLUMNS[self.index()]
    }

    /// Iterates over every hour of the day in order.
    pub fn all() -> impl Iterator<Item = HourOfDay> {
        (0..HOURS_PER_DAY as u8).map(Self)
    }
}

/// Truncates a timestamp to its UTC calendar day.
pub fn utc_day(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// The current UTC day.
pub fn today_utc() -> NaiveDate {
    utc_day(Utc::now())
}

/// Renders a day as its `YYYY-MM-DD` key.
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parses a strict, zero-padded `YYYY-MM-DD` string.
///
/// Surrounding whitespace is ignored. Anything else (`2026-1-5`,
/// `2026/01/05`, `+2026-01-05`, impossible dates) yields `None`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(raw, DAY_FORMAT).ok()
}

/// Formats an instant as RFC 3339 with second precision and a `Z` suffix.
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
