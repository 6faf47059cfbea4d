//! PostgreSQL implementation of the click store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use crate::domain::calendar::{HOUR_COLUMNS, HOURS_PER_DAY, HourOfDay, day_key, utc_day};
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{ClickStats, DailyClickStats};
use crate::domain::repositories::{ClickStore, StoreError};

/// One upsert statement per hour column, indexed by hour.
static UPSERT_SQL: LazyLock<Vec<String>> =
    LazyLock::new(|| HOUR_COLUMNS.iter().map(|column| upsert_sql(column)).collect());

static DAILY_SELECT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT qr_code_id, day, total, region_counts, last_at, last_country, {} \
         FROM click_daily_stats",
        HOUR_COLUMNS.join(", ")
    )
});

/// Builds the atomic increment for a single hour column.
///
/// Insert-or-update in one statement: the row is created with `total = 1`
/// and the hour at 1, or both are incremented in place. `last_at` only moves
/// forward and `last_country` follows the newest timestamp, so concurrent and
/// out-of-order clicks converge to the same row.
fn upsert_sql(column: &str) -> String {
    format!(
        r#"
        INSERT INTO click_daily_stats
            (qr_code_id, day, total, {column}, last_at, last_country, region_counts)
        VALUES (
            $1, $2, 1, 1, $3, $4::text,
            CASE WHEN $4::text <> '' THEN jsonb_build_object($4::text, 1) ELSE '{{}}'::jsonb END
        )
        ON CONFLICT (qr_code_id, day) DO UPDATE SET
            total = click_daily_stats.total + 1,
            {column} = click_daily_stats.{column} + 1,
            last_at = GREATEST(click_daily_stats.last_at, EXCLUDED.last_at),
            last_country = CASE
                WHEN EXCLUDED.last_at >= click_daily_stats.last_at THEN EXCLUDED.last_country
                ELSE click_daily_stats.last_country
            END,
            region_counts = CASE
                WHEN EXCLUDED.last_country <> '' THEN jsonb_set(
                    click_daily_stats.region_counts,
                    ARRAY[EXCLUDED.last_country],
                    to_jsonb(
                        COALESCE((click_daily_stats.region_counts ->> EXCLUDED.last_country)::bigint, 0) + 1
                    ),
                    true
                )
                ELSE click_daily_stats.region_counts
            END,
            updated_at = now()
        "#
    )
}

/// PostgreSQL click store backed by the `click_daily_stats` table.
///
/// Every click is a single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent
/// writers across any number of replicas never lose an increment. Cumulative
/// stats are aggregated from the daily rows on read.
pub struct PgClickStore {
    pool: Arc<PgPool>,
}

impl PgClickStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        Ok(())
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn daily_from_row(row: &PgRow) -> Result<DailyClickStats, sqlx::Error> {
    let mut hours = [0_i64; HOURS_PER_DAY];
    for hour in HourOfDay::all() {
        hours[hour.index()] = row.try_get(hour.column())?;
    }

    let Json(region_counts): Json<BTreeMap<String, i64>> = row.try_get("region_counts")?;
    let last_at: DateTime<Utc> = row.try_get("last_at")?;
    let last_country: String = row.try_get("last_country")?;

    Ok(DailyClickStats {
        qr_code_id: row.try_get("qr_code_id")?,
        day: row.try_get("day")?,
        total: row.try_get("total")?,
        hours,
        region_counts,
        last_at: Some(last_at),
        last_country: Some(last_country).filter(|c| !c.is_empty()),
    })
}

#[async_trait]
impl ClickStore for PgClickStore {
    async fn record_click(&self, event: &ClickEvent) -> Result<(), StoreError> {
        let hour = HourOfDay::of(event.at);

        sqlx::query(&UPSERT_SQL[hour.index()])
            .bind(&event.qr_code_id)
            .bind(utc_day(event.at))
            .bind(event.at)
            .bind(event.country_code().unwrap_or_default())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn get_stats(&self, qr_code_id: &str) -> Result<ClickStats, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(total), 0)::BIGINT AS total,
                MAX(last_at) AS last_at,
                (ARRAY_AGG(last_country ORDER BY last_at DESC))[1] AS last_country
            FROM click_daily_stats
            WHERE qr_code_id = $1
            "#,
        )
        .bind(qr_code_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        let last_at: Option<DateTime<Utc>> = row.try_get("last_at")?;
        let Some(last_at) = last_at else {
            return Err(StoreError::NotFound);
        };
        let last_country: Option<String> = row.try_get("last_country")?;

        Ok(ClickStats {
            qr_code_id: qr_code_id.to_string(),
            total: row.try_get("total")?,
            last_at: Some(last_at),
            last_country: last_country.filter(|c| !c.is_empty()),
        })
    }

    async fn get_daily(
        &self,
        qr_code_id: &str,
        day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError> {
        let sql = format!("{} WHERE qr_code_id = $1 AND day = $2", *DAILY_SELECT);

        let row = sqlx::query(&sql)
            .bind(qr_code_id)
            .bind(day)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(daily_from_row(&row)?)
    }

    async fn get_daily_batch(
        &self,
        qr_code_id: &str,
        days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError> {
        if days.is_empty() {
            return Ok(BTreeMap::new());
        }

        let sql = format!(
            "{} WHERE qr_code_id = $1 AND day = ANY($2) ORDER BY day",
            *DAILY_SELECT
        );

        let rows = sqlx::query(&sql)
            .bind(qr_code_id)
            .bind(days.to_vec())
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.iter()
            .map(|row| -> Result<_, StoreError> {
                let stats = daily_from_row(row)?;
                Ok((day_key(stats.day), stats))
            })
            .collect()
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
