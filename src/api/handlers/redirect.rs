//! Handler for tracked QR redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::net::SocketAddr;

use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use crate::application::services::Resolution;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_meta::{client_ip, country_from_headers, header_value};

/// Redirects a scanned QR code to its destination and records the click.
///
/// # Endpoint
///
/// `GET /r/{id}` (also answers `HEAD`; other methods get 405)
///
/// # Request Flow
///
/// 1. Resolve the identifier against the destination registry
/// 2. Active: build the redirect, then build a [`ClickEvent`] from the
///    request headers and hand it to a detached recording task
/// 3. Inactive with a global fallback: redirect without recording
///
/// # Response
///
/// `302 Found` with `Location` and `Cache-Control: no-store`, so every scan
/// reaches the service. The recording task is spawned just before the
/// response is returned to the server for writing; it is never awaited, so
/// the response neither waits for the click to be stored nor changes when
/// recording fails.
///
/// # Errors
///
/// Returns 404 Not Found for unknown or blank identifiers, inactive codes
/// without a fallback, and destinations with a blank URL.
/// Returns 502 Bad Gateway if the registry fails or times out, or returns a
/// URL that cannot be sent as a `Location` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match state.redirect_service.resolve(&id).await? {
        Resolution::Fallback(url) => found(&url),
        Resolution::Tracked(url) => {
            let response = found(&url)?;

            let event = ClickEvent {
                ip: Some(client_ip(&headers, peer)),
                user_agent: header_value(&headers, header::USER_AGENT.as_str()),
                referer: header_value(&headers, header::REFERER.as_str()),
                country: country_from_headers(&headers),
                request_id: header_value(&headers, REQUEST_ID_HEADER),
                accept_language: header_value(&headers, header::ACCEPT_LANGUAGE.as_str()),
                ..ClickEvent::new(id.trim(), url, Utc::now())
            };
            state.click_recorder.dispatch(event);

            Ok(response)
        }
    }
}

/// Builds an uncacheable `302 Found` response.
fn found(url: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(url)
        .map_err(|_| AppError::BadGateway(format!("unusable destination url: {url:?}")))?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}
