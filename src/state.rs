//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{ClickStatsService, RedirectService};
use crate::domain::click_recorder::ClickRecorder;
use crate::domain::repositories::{ClickStore, DestinationRegistry};

/// Services shared by every request.
///
/// Cheap to clone; everything inside is reference counted. The store and
/// registry are chosen once at startup and passed in, so tests can build a
/// state around any [`ClickStore`] / [`DestinationRegistry`] pair.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub click_stats_service: Arc<ClickStatsService>,
    pub click_recorder: ClickRecorder,
}

impl AppState {
    pub fn new(store: Arc<dyn ClickStore>, registry: Arc<dyn DestinationRegistry>) -> Self {
        Self {
            redirect_service: Arc::new(RedirectService::new(registry)),
            click_stats_service: Arc::new(ClickStatsService::new(Arc::clone(&store))),
            click_recorder: ClickRecorder::new(store),
        }
    }
}
