//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Click store implementations (memory and PostgreSQL)
//! - [`registry`] - HTTP client for the destination registry

pub mod persistence;
pub mod registry;
