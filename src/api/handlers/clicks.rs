//! Handlers for the click query API.

use axum::{
    Json,
    extract::{Path, State},
};
use std::collections::BTreeMap;

use crate::api::dto::clicks::ClicksQueryParams;
use crate::domain::entities::{ClickStats, DailyClickStats};
use crate::error::AppError;
use crate::state::AppState;

/// Cumulative click stats for one identifier.
///
/// # Endpoint
///
/// `GET /api/clicks/stats?qrId=`
///
/// # Response
///
/// ```json
/// { "qrCodeId": "qr-1", "total": 42, "lastAtIso": "2026-01-01T13:42:10Z", "lastCountry": "US" }
/// ```
///
/// # Errors
///
/// - 400 `qrId_required`
/// - 404 `not_found` if no clicks were recorded
/// - 500 `stats_failed`
pub async fn click_stats_handler(
    State(state): State<AppState>,
    params: ClicksQueryParams,
) -> Result<Json<ClickStats>, AppError> {
    let qr_id = params.qr_id()?;
    let stats = state.click_stats_service.get_stats(qr_id).await?;
    Ok(Json(stats))
}

/// Counters for one UTC day.
///
/// # Endpoint
///
/// `GET /api/clicks/daily?qrId=&day=YYYY-MM-DD`
///
/// `day` defaults to the current UTC day; `date` is accepted as an alias.
///
/// # Errors
///
/// - 400 `qrId_required`, `day_invalid`
/// - 404 `not_found` if the day has no clicks
/// - 500 `daily_failed`
pub async fn daily_clicks_handler(
    State(state): State<AppState>,
    params: ClicksQueryParams,
) -> Result<Json<DailyClickStats>, AppError> {
    let qr_id = params.qr_id()?;
    daily_for(&state, qr_id, &params).await
}

/// Counters for several UTC days in one request.
///
/// # Endpoint
///
/// `GET /api/clicks/daily-batch?qrId=&days=YYYY-MM-DD,YYYY-MM-DD`
///
/// # Response
///
/// A map keyed by day; days without clicks are absent.
///
/// ```json
/// { "2026-01-01": { "qrCodeId": "qr-1", "dayIso": "2026-01-01", "total": 7, "...": 0 } }
/// ```
///
/// # Errors
///
/// - 400 `qrId_required`, `days_required`, `invalid_day_format`, `no_valid_days`
/// - 500 `batch_failed`
pub async fn daily_batch_handler(
    State(state): State<AppState>,
    params: ClicksQueryParams,
) -> Result<Json<BTreeMap<String, DailyClickStats>>, AppError> {
    let qr_id = params.qr_id()?;
    daily_batch_for(&state, qr_id, &params).await
}

/// `GET /api/clicks/{qrId}`; same as [`click_stats_handler`].
pub async fn legacy_click_stats_handler(
    State(state): State<AppState>,
    Path(qr_id): Path<String>,
) -> Result<Json<ClickStats>, AppError> {
    let qr_id = path_qr_id(&qr_id)?;
    let stats = state.click_stats_service.get_stats(qr_id).await?;
    Ok(Json(stats))
}

/// `GET /api/clicks/{qrId}/daily`; same as [`daily_clicks_handler`].
pub async fn legacy_daily_clicks_handler(
    State(state): State<AppState>,
    Path(qr_id): Path<String>,
    params: ClicksQueryParams,
) -> Result<Json<DailyClickStats>, AppError> {
    daily_for(&state, path_qr_id(&qr_id)?, &params).await
}

/// `GET /api/clicks/{qrId}/daily-batch`; same as [`daily_batch_handler`].
pub async fn legacy_daily_batch_handler(
    State(state): State<AppState>,
    Path(qr_id): Path<String>,
    params: ClicksQueryParams,
) -> Result<Json<BTreeMap<String, DailyClickStats>>, AppError> {
    daily_batch_for(&state, path_qr_id(&qr_id)?, &params).await
}

fn path_qr_id(raw: &str) -> Result<&str, AppError> {
    let qr_id = raw.trim();
    if qr_id.is_empty() {
        return Err(AppError::Validation("qrId_required"));
    }
    Ok(qr_id)
}

async fn daily_for(
    state: &AppState,
    qr_id: &str,
    params: &ClicksQueryParams,
) -> Result<Json<DailyClickStats>, AppError> {
    let day = params.day()?;
    let stats = state.click_stats_service.get_daily(qr_id, day).await?;
    Ok(Json(stats))
}

async fn daily_batch_for(
    state: &AppState,
    qr_id: &str,
    params: &ClicksQueryParams,
) -> Result<Json<BTreeMap<String, DailyClickStats>>, AppError> {
    let days = params.days()?;
    let batch = state
        .click_stats_service
        .get_daily_batch(qr_id, &days)
        .await?;
    Ok(Json(batch))
}
