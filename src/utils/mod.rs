//! Request helpers.
//!
//! - [`client_meta`] - Client IP and country extraction from HTTP headers

pub mod client_meta;
