//! Fire-and-forget click recording.
//!
//! The redirect path hands each [`ClickEvent`] to [`ClickRecorder::dispatch`],
//! which spawns a detached task and returns immediately. The task's outcome
//! is only logged: a failed or panicking store write never reaches the
//! client and never takes the process down.
//!
//! There is no retry, no durable queue and no backpressure. An event whose
//! task has not finished when the process exits is lost.

use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickStore;

/// What happened to a single recording attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    Failed,
    Panicked,
}

/// Spawns detached recording tasks against a shared [`ClickStore`].
#[derive(Clone)]
pub struct ClickRecorder {
    store: Arc<dyn ClickStore>,
}

impl ClickRecorder {
    pub fn new(store: Arc<dyn ClickStore>) -> Self {
        Self { store }
    }

    /// Records `event` in the background.
    ///
    /// Must be called from within a Tokio runtime. The task handle is
    /// discarded; use [`record_guarded`] to await an outcome directly.
    pub fn dispatch(&self, event: ClickEvent) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            record_guarded(store.as_ref(), &event).await;
        });
    }
}

/// Records one event, converting errors and panics into a logged outcome.
pub async fn record_guarded(store: &dyn ClickStore, event: &ClickEvent) -> RecordOutcome {
    let attempt = AssertUnwindSafe(async { store.record_click(event).await }).catch_unwind();

    match attempt.await {
        Ok(Ok(())) => {
            debug!(
                qr_code_id = %event.qr_code_id,
                backend = store.backend(),
                "Click recorded"
            );
            RecordOutcome::Recorded
        }
        Ok(Err(e)) => {
            warn!(
                qr_code_id = %event.qr_code_id,
                request_id = event.request_id.as_deref().unwrap_or("-"),
                backend = store.backend(),
                "Failed to record click: {}",
                e
            );
            RecordOutcome::Failed
        }
        Err(payload) => {
            error!(
                qr_code_id = %event.qr_code_id,
                request_id = event.request_id.as_deref().unwrap_or("-"),
                backend = store.backend(),
                "Click recording panicked: {}",
                panic_message(payload.as_ref())
            );
            RecordOutcome::Panicked
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
