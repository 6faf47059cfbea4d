//! HTTP client for the destination registry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::domain::repositories::{Destination, DestinationRegistry, RegistryError};

#[derive(Debug, Deserialize)]
struct QrCodeResponse {
    #[serde(default)]
    url: String,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsResponse {
    #[serde(default)]
    default_redirect_url: String,
}

/// Registry client speaking the QR service's JSON API.
///
/// # Endpoints
///
/// - `GET {base}/api/qr-codes/{id}` → `{"id": "...", "url": "...", "active": true}`, `404` if unknown
/// - `GET {base}/api/settings` → `{"defaultRedirectUrl": "..."}`
///
/// Every request is bounded by the configured timeout; there are no retries.
pub struct HttpDestinationRegistry {
    base_url: Url,
    client: Client,
}

impl HttpDestinationRegistry {
    /// Creates a client for the registry at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL that can carry a path, and [`RegistryError::Transport`] if
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let base_url =
            Url::parse(base_url).map_err(|e| RegistryError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("click-service/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RegistryError> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(RegistryError::NotFound),
            status => return Err(RegistryError::UnexpectedStatus(status.as_u16())),
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout
            } else {
                RegistryError::Decode(e.to_string())
            }
        })
    }
}

fn transport_error(e: reqwest::Error) -> RegistryError {
    if e.is_timeout() {
        RegistryError::Timeout
    } else {
        RegistryError::Transport(e.to_string())
    }
}

#[async_trait]
impl DestinationRegistry for HttpDestinationRegistry {
    async fn fetch_destination(&self, qr_code_id: &str) -> Result<Destination, RegistryError> {
        let qr_code_id = qr_code_id.trim();
        if qr_code_id.is_empty() {
            return Err(RegistryError::NotFound);
        }

        let url = self.endpoint(&["api", "qr-codes", qr_code_id])?;
        let body: QrCodeResponse = self.get_json(url).await?;

        Ok(Destination {
            url: body.url,
            active: body.active,
        })
    }

    async fn fetch_default_redirect(&self) -> Result<Option<String>, RegistryError> {
        let url = self.endpoint(&["api", "settings"])?;
        let body: SettingsResponse = self.get_json(url).await?;

        let fallback = body.default_redirect_url.trim();
        Ok((!fallback.is_empty()).then(|| fallback.to_string()))
    }
}
