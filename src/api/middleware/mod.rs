//! HTTP middleware for request processing.
//!
//! Provides observability, request correlation, CORS and panic recovery.

pub mod cors;
pub mod panic;
pub mod request_id;
pub mod tracing;
