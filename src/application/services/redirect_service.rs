//! Redirect resolution against the destination registry.

use std::sync::Arc;
use tracing::warn;

use crate::domain::repositories::{DestinationRegistry, RegistryError};
use crate::error::AppError;

/// Where to send a scan, and whether it counts as a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Active destination: redirect and record a click.
    Tracked(String),
    /// Inactive destination with a global fallback: redirect, record nothing.
    Fallback(String),
}

/// Decides the outcome of a tracked redirect.
///
/// The registry is consulted on every call; nothing is cached.
pub struct RedirectService {
    registry: Arc<dyn DestinationRegistry>,
}

impl RedirectService {
    pub fn new(registry: Arc<dyn DestinationRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves a tracking identifier to a redirect target.
    ///
    /// # Resolution Order
    ///
    /// 1. Blank identifier → not found
    /// 2. Registry lookup: unknown → not found, failure → bad gateway
    /// 3. Inactive → global fallback URL, or not found when none is configured
    /// 4. Active with a blank URL → not found
    /// 5. Active → tracked redirect
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::BadGateway`] as above.
    pub async fn resolve(&self, qr_code_id: &str) -> Result<Resolution, AppError> {
        let qr_code_id = qr_code_id.trim();
        if qr_code_id.is_empty() {
            return Err(AppError::NotFound);
        }

        let destination = self
            .registry
            .fetch_destination(qr_code_id)
            .await
            .inspect_err(|e| {
                if !matches!(e, RegistryError::NotFound) {
                    warn!(qr_code_id, "Destination lookup failed: {}", e);
                }
            })?;

        if !destination.active {
            return match self.registry.fetch_default_redirect().await {
                Ok(Some(url)) => Ok(Resolution::Fallback(url)),
                Ok(None) => Err(AppError::NotFound),
                Err(e) => {
                    // Treated as "no fallback configured"
                    warn!(qr_code_id, "Default redirect lookup failed: {}", e);
                    Err(AppError::NotFound)
                }
            };
        }

        let url = destination.url.trim();
        if url.is_empty() {
            return Err(AppError::NotFound);
        }

        Ok(Resolution::Tracked(url.to_string()))
    }
}
