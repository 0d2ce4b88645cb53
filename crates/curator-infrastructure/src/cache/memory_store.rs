// ============================================================================
// Curator Infrastructure - In-Process Key-Value Store
// File: crates/curator-infrastructure/src/cache/memory_store.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use curator_core::error::DomainError;
use curator_core::repositories::KeyValueStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Single-process store used for development and tests.
///
/// Expired entries are invisible to readers immediately and are physically
/// removed either on access or by `purge_expired`.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Ok(Some(entry.value.clone()));
            }
        } else {
            return Ok(None);
        }

        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        Ok(self.entries.get(key).map(|e| e.is_live(now)).unwrap_or(false))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .map(|(_, entry)| entry.is_live(now))
            .unwrap_or(false))
    }

    async fn purge_expired(&self, prefix: &str) -> Result<usize, DomainError> {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|key, entry| !key.starts_with(prefix) || entry.is_live(now));
        let removed = before.saturating_sub(self.entries.len());
        debug!("Memory sweep removed {} entries", removed);
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
