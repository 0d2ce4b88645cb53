//! Catalog adapters that do not need a database

pub mod in_memory_catalog;

pub use in_memory_catalog::InMemoryCatalog;
