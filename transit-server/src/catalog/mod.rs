//! Stop and trip catalogs.
//!
//! The catalogs are the engine's only external collaborators: a stop
//! lookup and a read-only trip store, both loaded from a dataset file
//! at startup.

mod loader;
mod stops;
mod store;

pub use loader::{Dataset, LoadError, build_catalog, load_dataset};
pub use stops::StopCatalog;
pub use store::{InMemoryTripStore, StoreError, TripFilter, TripStore};
