//! Storage contract for click counters.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{ClickStats, DailyClickStats};

/// Errors produced by [`ClickStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No clicks have been recorded for the requested identifier or day.
    #[error("no clicks recorded")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage interface for click counters.
///
/// One contract, two interchangeable backends selected at startup:
///
/// - [`crate::infrastructure::persistence::MemoryClickStore`] - process-local, lost on restart
/// - [`crate::infrastructure::persistence::PgClickStore`] - PostgreSQL, shared across replicas
///
/// Implementations must be safe under concurrent `record_click` calls for the
/// same identifier and day: no increment may be lost and every read must
/// observe `total == sum(hours)`.
///
/// Days are UTC calendar days. Callers truncate timestamps with
/// [`crate::domain::calendar::utc_day`] before querying.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickStore: Send + Sync {
    /// Records one click into its UTC day/hour bucket.
    ///
    /// Increments the day total, the matching hourly counter and (for a
    /// non-blank country) the region counter, and applies last-writer-wins
    /// to the last-seen fields. The hour is taken from the event's UTC
    /// timestamp, so it is always within `0..=23`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on storage failures.
    async fn record_click(&self, event: &ClickEvent) -> Result<(), StoreError>;

    /// Cumulative stats across all days.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no click exists for `qr_code_id`.
    async fn get_stats(&self, qr_code_id: &str) -> Result<ClickStats, StoreError>;

    /// Counters for a single day.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if there is no bucket for that day.
    async fn get_daily(
        &self,
        qr_code_id: &str,
        day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError>;

    /// Counters for several days, keyed by `YYYY-MM-DD`.
    ///
    /// Days without clicks are absent from the map. An empty `days` slice
    /// yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on storage failures; missing days are
    /// never an error.
    async fn get_daily_batch(
        &self,
        qr_code_id: &str,
        days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError>;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
