//! Destination registry clients.

pub mod http_registry;

pub use http_registry::HttpDestinationRegistry;
