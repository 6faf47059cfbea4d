//! Click store implementations.
//!
//! # Stores
//!
//! - [`MemoryClickStore`] - Process-local store behind a single `RwLock`
//! - [`PgClickStore`] - PostgreSQL store using single-statement atomic upserts
//!
//! The server picks one at startup: PostgreSQL when a database URL is
//! configured, memory otherwise.

pub mod memory_click_store;
pub mod pg_click_store;

pub use memory_click_store::MemoryClickStore;
pub use pg_click_store::PgClickStore;
