//! CLI administration tool for click-service.
//!
//! Reads click counters straight from the PostgreSQL store and runs
//! database maintenance without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Cumulative stats for one QR code
//! cargo run --bin admin -- stats qr-123
//!
//! # One UTC day with an hourly histogram
//! cargo run --bin admin -- daily qr-123 --day 2026-01-01
//!
//! # Last 7 UTC days
//! cargo run --bin admin -- trend qr-123 --days 7
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use click_service::config::Config;
use click_service::domain::calendar::{HourOfDay, day_key, format_instant, parse_day, today_utc};
use click_service::domain::repositories::{ClickStore, StoreError};
use click_service::infrastructure::persistence::PgClickStore;
use click_service::server::connect_pool;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

const HISTOGRAM_WIDTH: i64 = 40;

/// CLI tool for inspecting click counters.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show all-time stats for a QR code
    Stats {
        /// QR code identifier
        qr_id: String,
    },

    /// Show one UTC day with hourly buckets
    Daily {
        /// QR code identifier
        qr_id: String,

        /// Day as YYYY-MM-DD (default: today, UTC)
        #[arg(short, long, value_parser = parse_day_arg)]
        day: Option<NaiveDate>,
    },

    /// Show daily totals for the last N UTC days
    Trend {
        /// QR code identifier
        qr_id: String,

        /// Number of days, including today
        #[arg(short = 'n', long, default_value_t = 7, value_parser = clap::value_parser!(u64).range(1..=366))]
        days: u64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn parse_day_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_day(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_HOST and friends) must be set")?;

    let pool = connect_pool(&config, &database_url).await?;
    let store = PgClickStore::new(Arc::new(pool));

    match cli.command {
        Commands::Stats { qr_id } => handle_stats(&store, &qr_id).await?,
        Commands::Daily { qr_id, day } => {
            handle_daily(&store, &qr_id, day.unwrap_or_else(today_utc)).await?
        }
        Commands::Trend { qr_id, days } => handle_trend(&store, &qr_id, days).await?,
        Commands::Db { action } => handle_db_action(action, &store).await?,
    }

    Ok(())
}

/// Displays cumulative stats for one identifier.
async fn handle_stats(store: &PgClickStore, qr_id: &str) -> Result<()> {
    println!("{} {}", "📊 Clicks for".bright_blue().bold(), qr_id.cyan());
    println!();

    let stats = match store.get_stats(qr_id).await {
        Ok(stats) => stats,
        Err(StoreError::NotFound) => {
            println!("{}", "  No clicks recorded".yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load stats"),
    };

    println!(
        "  Total:        {}",
        stats.total.to_string().bright_green().bold()
    );
    if let Some(last_at) = stats.last_at {
        println!("  Last click:   {}", format_instant(last_at).bright_white());
    }
    if let Some(country) = stats.last_country.as_deref() {
        println!("  Last country: {}", country.bright_white());
    }
    println!();

    Ok(())
}

/// Displays one day with a bar per hour.
///
/// # Output Format
///
/// ```text
/// 📅 qr-123 on 2026-01-01
///
///   00  ████████                                  2
///   13  ████████████████████████████████████████  5
///
///   Total: 7
/// ```
async fn handle_daily(store: &PgClickStore, qr_id: &str, day: NaiveDate) -> Result<()> {
    println!(
        "{} {} on {}",
        "📅".bright_blue(),
        qr_id.cyan(),
        day_key(day).bright_white()
    );
    println!();

    let daily = match store.get_daily(qr_id, day).await {
        Ok(daily) => daily,
        Err(StoreError::NotFound) => {
            println!("{}", "  No clicks on this day".yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load daily stats"),
    };

    let peak = daily.hours.iter().copied().max().unwrap_or(0).max(1);

    for hour in HourOfDay::all() {
        let count = daily.hour(hour);
        let width = (count * HISTOGRAM_WIDTH / peak) as usize;
        println!(
            "  {:02}  {}  {}",
            hour.index(),
            format!("{:<40}", "█".repeat(width)).green(),
            if count > 0 {
                count.to_string().bright_white().bold()
            } else {
                count.to_string().bright_black()
            }
        );
    }

    println!();
    println!("  Total: {}", daily.total.to_string().bright_green().bold());
    if !daily.region_counts.is_empty() {
        let regions: Vec<String> = daily
            .region_counts
            .iter()
            .map(|(country, count)| format!("{country}={count}"))
            .collect();
        println!("  Regions: {}", regions.join(", ").bright_white());
    }
    println!();

    Ok(())
}

/// Displays daily totals for the last `days` UTC days, oldest first.
async fn handle_trend(store: &PgClickStore, qr_id: &str, days: u64) -> Result<()> {
    println!(
        "{} {} over {} day(s)",
        "📈 Trend for".bright_blue().bold(),
        qr_id.cyan(),
        days
    );
    println!();

    let today = today_utc();
    let range: Vec<NaiveDate> = (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();

    let batch = store
        .get_daily_batch(qr_id, &range)
        .await
        .context("Failed to load daily stats")?;

    let mut sum = 0;
    for day in &range {
        let key = day_key(*day);
        let total = batch.get(&key).map_or(0, |daily| daily.total);
        sum += total;
        println!("  {}  {}", key.bright_black(), format!("{total:>8}").bright_white());
    }

    println!("  {}", "─".repeat(20).bright_black());
    println!("  Total       {}", format!("{sum:>8}").bright_green().bold());
    println!();

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, store: &PgClickStore) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(store.pool()).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(store.pool())
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Apply pending migrations?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            store
                .migrate()
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
