//! Read-side service for click counters.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{ClickStats, DailyClickStats};
use crate::domain::repositories::{ClickStore, StoreError};
use crate::error::AppError;

/// Maps store lookups onto HTTP-facing errors.
///
/// A missing identifier or day becomes [`AppError::NotFound`]; any other store
/// failure becomes an [`AppError::Internal`] with an operation-specific code.
pub struct ClickStatsService {
    store: Arc<dyn ClickStore>,
}

impl ClickStatsService {
    pub fn new(store: Arc<dyn ClickStore>) -> Self {
        Self { store }
    }

    /// Name of the backing store.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Cumulative stats for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no clicks exist, or an internal
    /// `stats_failed` error on store failures.
    pub async fn get_stats(&self, qr_code_id: &str) -> Result<ClickStats, AppError> {
        self.store
            .get_stats(qr_code_id)
            .await
            .map_err(|e| map_store_error(e, "stats_failed"))
    }

    /// Counters for a single UTC day.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the day has no clicks, or an internal
    /// `daily_failed` error on store failures.
    pub async fn get_daily(
        &self,
        qr_code_id: &str,
        day: NaiveDate,
    ) -> Result<DailyClickStats, AppError> {
        self.store
            .get_daily(qr_code_id, day)
            .await
            .map_err(|e| map_store_error(e, "daily_failed"))
    }

    /// Counters for several UTC days, keyed by `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns an internal `batch_failed` error on store failures.
    pub async fn get_daily_batch(
        &self,
        qr_code_id: &str,
        days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, AppError> {
        self.store
            .get_daily_batch(qr_code_id, days)
            .await
            .map_err(|e| map_store_error(e, "batch_failed"))
    }
}

fn map_store_error(e: StoreError, code: &'static str) -> AppError {
    match e {
        StoreError::NotFound => AppError::NotFound,
        other => AppError::internal(code, other.to_string()),
    }
}
