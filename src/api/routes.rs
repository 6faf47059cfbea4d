//! Click query API routes.

use crate::api::handlers::{
    click_stats_handler, daily_batch_handler, daily_clicks_handler, legacy_click_stats_handler,
    legacy_daily_batch_handler, legacy_daily_clicks_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Read-only click query routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET /clicks/stats?qrId=`                 - Cumulative stats
/// - `GET /clicks/daily?qrId=&day=`            - One UTC day
/// - `GET /clicks/daily-batch?qrId=&days=`     - Several UTC days
/// - `GET /clicks/{qrId}`                      - Cumulative stats (path form)
/// - `GET /clicks/{qrId}/daily?day=`           - One UTC day (path form)
/// - `GET /clicks/{qrId}/daily-batch?days=`    - Several UTC days (path form)
///
/// Static segments take precedence, so `stats`, `daily` and `daily-batch`
/// are never treated as identifiers.
pub fn click_routes() -> Router<AppState> {
    Router::new()
        .route("/clicks/stats", get(click_stats_handler))
        .route("/clicks/daily", get(daily_clicks_handler))
        .route("/clicks/daily-batch", get(daily_batch_handler))
        .route("/clicks/{qr_id}", get(legacy_click_stats_handler))
        .route("/clicks/{qr_id}/daily", get(legacy_daily_clicks_handler))
        .route(
            "/clicks/{qr_id}/daily-batch",
            get(legacy_daily_batch_handler),
        )
}
