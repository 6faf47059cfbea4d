//! Business logic services for the application layer.

pub mod click_stats_service;
pub mod redirect_service;

pub use click_stats_service::ClickStatsService;
pub use redirect_service::{RedirectService, Resolution};
