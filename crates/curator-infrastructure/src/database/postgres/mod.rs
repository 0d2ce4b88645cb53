//! PostgreSQL repository implementations

pub mod catalog_repo_impl;

pub use catalog_repo_impl::PgCatalogRepository;
