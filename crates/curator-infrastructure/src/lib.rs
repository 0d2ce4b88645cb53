//! # Curator Infrastructure
//!
//! Adapters for the core ports: key-value stores, catalogs, and the icon fetcher.

pub mod database;
pub mod cache;
pub mod catalog;
pub mod http;

pub use cache::{spawn_sweeper, MemoryStore, RedisStore, SweeperHandle};
pub use catalog::InMemoryCatalog;
pub use database::{create_pool, PgCatalogRepository};
pub use http::HttpIconSource;
