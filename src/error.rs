//! HTTP-facing error type.
//!
//! Every error response carries a stable, machine-readable code:
//!
//! ```json
//! { "error": "qrId_required" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::repositories::RegistryError;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request input; the code names the problem.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    /// The destination registry failed, timed out or returned unusable data.
    #[error("upstream failure: {0}")]
    BadGateway(String),

    #[error("{code}: {message}")]
    Internal { code: &'static str, message: String },
}

impl AppError {
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code rendered in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(code) => code,
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::BadGateway(_) => "bad_gateway",
            Self::Internal { code, .. } => code,
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound => Self::NotFound,
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal { code, message } => tracing::error!(code = *code, "{}", message),
            Self::BadGateway(reason) => tracing::warn!("Registry unavailable: {}", reason),
            _ => {}
        }

        let body = ErrorBody { error: self.code() };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (
                AppError::Validation("qrId_required"),
                400,
                "qrId_required",
            ),
            (AppError::NotFound, 404, "not_found"),
            (AppError::MethodNotAllowed, 405, "method_not_allowed"),
            (AppError::BadGateway("timeout".into()), 502, "bad_gateway"),
            (AppError::internal("stats_failed", "db down"), 500, "stats_failed"),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status().as_u16(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn test_registry_error_conversion() {
        assert!(matches!(
            AppError::from(RegistryError::NotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(RegistryError::Timeout),
            AppError::BadGateway(_)
        ));
        assert!(matches!(
            AppError::from(RegistryError::UnexpectedStatus(500)),
            AppError::BadGateway(_)
        ));
    }
}
