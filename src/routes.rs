//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{id}`     - Tracked QR redirect (public)
//! - `GET  /healthz`    - Liveness probe
//! - `/api/clicks/*`    - Click query API (CORS-enabled)
//!
//! Unmatched paths answer `404 {"error":"not_found"}` and unsupported
//! methods `405 {"error":"method_not_allowed"}`.
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Panic recovery** - A panicking handler yields `500 {"error":"internal_error"}`
//! - **Request id** - `X-Request-Id` is generated when missing
//! - **Tracing** - Structured request/response logging with the request id
//! - **Request id propagation** - The id is echoed on the response
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, panic, request_id, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::{Layer, ServiceBuilder};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with its middleware stack.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origins` - origins allowed to call the query API from a browser
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let api_router = api::routes::click_routes().layer(cors::layer(cors_origins));

    Router::new()
        .route("/r/{id}", get(redirect_handler))
        .route("/healthz", get(health_handler))
        .nest("/api", api_router)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(panic::layer())
                .layer(request_id::set_layer())
                .layer(tracing::layer())
                .layer(request_id::propagate_layer()),
        )
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// The router wrapped in trailing-slash normalization, ready to serve.
pub fn app_router(state: AppState, cors_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_origins))
}
