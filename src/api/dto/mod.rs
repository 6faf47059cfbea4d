//! Data Transfer Objects for API requests and responses.
//!
//! Response bodies for click data are the domain entities themselves, which
//! carry their own JSON shape; this module only holds request parameters and
//! the health payload.

pub mod clicks;
pub mod health;
