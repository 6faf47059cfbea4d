//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the two external collaborators of the service: the
//! click counter storage and the destination registry. Concrete
//! implementations live in the infrastructure layer.
//!
//! # Available Repositories
//!
//! - [`ClickStore`] - Day/hour bucketed click counters
//! - [`DestinationRegistry`] - Redirect destination lookup

pub mod click_store;
pub mod destination_registry;

pub use click_store::{ClickStore, StoreError};
pub use destination_registry::{Destination, DestinationRegistry, RegistryError};

#[cfg(test)]
pub use click_store::MockClickStore;
#[cfg(test)]
pub use destination_registry::MockDestinationRegistry;
