//! Application layer services.
//!
//! Services consume the domain traits and translate their outcomes into
//! [`crate::error::AppError`] for the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Redirect resolution
//! - [`services::click_stats_service::ClickStatsService`] - Click counter queries

pub mod services;
