//! Key-value store port with per-key expiry

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::DomainError;

/// Minimal `GET` / `SET EX` / `EXISTS` surface the session store relies on.
///
/// Expired keys must be unreadable through every method; implementations
/// surface connectivity failures as `DomainError::UpstreamUnavailable`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Atomically overwrite `key` and (re)arm its expiry.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// Returns whether a live key was removed.
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Proactively drop expired entries under `prefix`. Returns the number removed.
    async fn purge_expired(&self, prefix: &str) -> Result<usize, DomainError>;

    async fn ping(&self) -> Result<(), DomainError>;
}
