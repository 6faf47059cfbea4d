//! Contract for the external registry that owns redirect destinations.

use async_trait::async_trait;
use thiserror::Error;

/// The registry's answer for a tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub url: String,
    pub active: bool,
}

/// Errors produced by [`DestinationRegistry`] implementations.
///
/// Only [`RegistryError::NotFound`] is a definitive answer; every other
/// variant means the registry could not be consulted.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("destination not found")]
    NotFound,

    #[error("registry request timed out")]
    Timeout,

    #[error("registry responded with status {0}")]
    UnexpectedStatus(u16),

    #[error("registry request failed: {0}")]
    Transport(String),

    #[error("registry response could not be decoded: {0}")]
    Decode(String),

    #[error("invalid registry base url: {0}")]
    InvalidBaseUrl(String),
}

/// Lookup interface for redirect destinations.
///
/// # Implementations
///
/// - [`crate::infrastructure::registry::HttpDestinationRegistry`] - HTTP client with a bounded timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationRegistry: Send + Sync {
    /// Looks up the destination for a tracking identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when the registry does not know the
    /// identifier (or the identifier is blank), and another variant when the
    /// registry is unreachable, slow or returns an unexpected response.
    async fn fetch_destination(&self, qr_code_id: &str) -> Result<Destination, RegistryError>;

    /// Looks up the global fallback URL used for inactive destinations.
    ///
    /// Returns `Ok(None)` when no non-blank fallback is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the registry cannot be consulted.
    async fn fetch_default_redirect(&self) -> Result<Option<String>, RegistryError>;
}
