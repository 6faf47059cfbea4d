//! Click counter entities.
//!
//! # Entity Types
//!
//! - [`DailyClickStats`] - One identifier on one UTC day, with 24 hourly buckets
//! - [`ClickStats`] - All-time summary for one identifier
//!
//! Both are plain data with a single `record` mutator; the stores own
//! locking and persistence.

pub mod click_stats;
pub mod daily_stats;

pub use click_stats::ClickStats;
pub use daily_stats::DailyClickStats;
