//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod clicks;
pub mod health;
pub mod redirect;

pub use clicks::{
    click_stats_handler, daily_batch_handler, daily_clicks_handler, legacy_click_stats_handler,
    legacy_daily_batch_handler, legacy_daily_clicks_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
