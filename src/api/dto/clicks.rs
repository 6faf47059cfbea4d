//! Query parameters for the click query endpoints.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::NaiveDate;

use crate::domain::calendar::{parse_day, today_utc};
use crate::error::AppError;

/// Query string accepted by `/api/clicks/*`.
///
/// Each endpoint reads only the fields it needs; unknown parameters are
/// ignored. A repeated parameter keeps its first value.
///
/// - `qrId` - tracking identifier (required unless given in the path)
/// - `day` / `date` - single `YYYY-MM-DD` day; `date` is read when `day` is blank
/// - `days` - comma-separated `YYYY-MM-DD` list
#[derive(Debug, Default)]
pub struct ClicksQueryParams {
    pub qr_id: Option<String>,
    pub day: Option<String>,
    pub date: Option<String>,
    pub days: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for ClicksQueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Validation("invalid_query"))?;
        Ok(Self::from_pairs(pairs))
    }
}

impl ClicksQueryParams {
    /// Builds the parameters from decoded query pairs; the first occurrence
    /// of each known key wins, even when it is blank.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "qrId" => &mut params.qr_id,
                "day" => &mut params.day,
                "date" => &mut params.date,
                "days" => &mut params.days,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// The trimmed `qrId` parameter.
    ///
    /// # Errors
    ///
    /// Returns `qrId_required` if it is missing or blank.
    pub fn qr_id(&self) -> Result<&str, AppError> {
        non_blank(self.qr_id.as_deref()).ok_or(AppError::Validation("qrId_required"))
    }

    /// The requested day, defaulting to the current UTC day.
    ///
    /// # Errors
    ///
    /// Returns `day_invalid` if the value is not a strict `YYYY-MM-DD` date.
    pub fn day(&self) -> Result<NaiveDate, AppError> {
        match non_blank(self.day.as_deref()).or_else(|| non_blank(self.date.as_deref())) {
            None => Ok(today_utc()),
            Some(raw) => parse_day(raw).ok_or(AppError::Validation("day_invalid")),
        }
    }

    /// The requested days, in request order. Blank entries are skipped.
    ///
    /// # Errors
    ///
    /// - `days_required` if the parameter is missing or blank
    /// - `invalid_day_format` if any entry is not a strict `YYYY-MM-DD` date
    /// - `no_valid_days` if only blank entries were given
    pub fn days(&self) -> Result<Vec<NaiveDate>, AppError> {
        let raw = non_blank(self.days.as_deref()).ok_or(AppError::Validation("days_required"))?;

        let days = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| parse_day(entry).ok_or(AppError::Validation("invalid_day_format")))
            .collect::<Result<Vec<_>, _>>()?;

        if days.is_empty() {
            return Err(AppError::Validation("no_valid_days"));
        }

        Ok(days)
    }
}
