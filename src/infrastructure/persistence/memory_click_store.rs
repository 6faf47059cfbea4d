//! In-memory click store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::calendar::{HourOfDay, day_key, utc_day};
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{ClickStats, DailyClickStats};
use crate::domain::repositories::{ClickStore, StoreError};

#[derive(Default)]
struct Counters {
    daily: HashMap<String, HashMap<NaiveDate, DailyClickStats>>,
    cumulative: HashMap<String, ClickStats>,
}

/// Process-local click store guarded by a single reader/writer lock.
///
/// Writes take the exclusive lock for the whole day + cumulative update, so
/// readers never observe a bucket whose total disagrees with its hours.
/// Contents are lost on restart and not shared between replicas.
#[derive(Default)]
pub struct MemoryClickStore {
    counters: RwLock<Counters>,
}

impl MemoryClickStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickStore for MemoryClickStore {
    async fn record_click(&self, event: &ClickEvent) -> Result<(), StoreError> {
        let day = utc_day(event.at);
        let hour = HourOfDay::of(event.at);
        let country = event.country_code();

        let mut guard = self.counters.write().await;
        let counters = &mut *guard;

        counters
            .daily
            .entry(event.qr_code_id.clone())
            .or_default()
            .entry(day)
            .or_insert_with(|| DailyClickStats::empty(event.qr_code_id.as_str(), day))
            .record(hour, event.at, country);

        counters
            .cumulative
            .entry(event.qr_code_id.clone())
            .or_insert_with(|| ClickStats::empty(event.qr_code_id.as_str()))
            .record(event.at, country);

        Ok(())
    }

    async fn get_stats(&self, qr_code_id: &str) -> Result<ClickStats, StoreError> {
        self.counters
            .read()
            .await
            .cumulative
            .get(qr_code_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_daily(
        &self,
        qr_code_id: &str,
        day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError> {
        self.counters
            .read()
            .await
            .daily
            .get(qr_code_id)
            .and_then(|days| days.get(&day))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_daily_batch(
        &self,
        qr_code_id: &str,
        days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError> {
        if days.is_empty() {
            return Ok(BTreeMap::new());
        }

        let counters = self.counters.read().await;
        let Some(by_day) = counters.daily.get(qr_code_id) else {
            return Ok(BTreeMap::new());
        };

        Ok(days
            .iter()
            .filter_map(|day| by_day.get(day))
            .map(|stats| (day_key(stats.day), stats.clone()))
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
