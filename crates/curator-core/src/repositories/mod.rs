//! Repository traits (ports)

pub mod kv_store;
pub mod catalog_repository;
pub mod icon_source;

pub use kv_store::KeyValueStore;
pub use catalog_repository::{CatalogBrowser, CatalogLookup};
pub use icon_source::{IconImage, IconSource};

#[cfg(test)]
pub use kv_store::MockKeyValueStore;
#[cfg(test)]
pub use catalog_repository::MockCatalogLookup;
#[cfg(test)]
pub use icon_source::MockIconSource;
