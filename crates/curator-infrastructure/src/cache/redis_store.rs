// ============================================================================
// Curator Infrastructure - Redis Key-Value Store
// File: crates/curator-infrastructure/src/cache/redis_store.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::{cmd, AsyncCommands, RedisError};
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use tracing::{debug, error, info};

use curator_core::error::DomainError;
use curator_core::repositories::KeyValueStore;

/// Glob matching a hyphenated UUID, so sweeps never touch foreign keys
/// even when sessions share the keyspace without a prefix.
const SESSION_ID_GLOB: &str = "????????-????-????-????-????????????";
const SCAN_BATCH: usize = 200;

/// `KeyValueStore` backed by a deadpool-managed Redis connection pool.
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub fn new(url: &str, max_connections: usize) -> Result<Self, DomainError> {
        let mut config = Config::from_url(url);
        config.pool = Some(PoolConfig::new(max_connections.max(1)));
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DomainError::ConfigError(format!("invalid redis configuration: {}", e)))?;

        info!("Redis pool created (max {} connections)", max_connections.max(1));
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Failed to acquire redis connection: {}", e);
            DomainError::UpstreamUnavailable(format!("redis: {}", e))
        })
    }
}

/// TTL reply for a key that is already gone. Live keys report seconds left,
/// keys without an expiry report -1.
fn is_expired_ttl(ttl: i64) -> bool {
    ttl == -2
}

fn upstream(e: RedisError) -> DomainError {
    error!("Redis command failed: {}", e);
    DomainError::UpstreamUnavailable(format!("redis: {}", e))
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(upstream)?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.conn().await?;
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await.map_err(upstream)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn().await?;
        let found: bool = conn.exists(key).await.map_err(upstream)?;
        Ok(found)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn().await?;
        let removed: i64 = conn.del(key).await.map_err(upstream)?;
        Ok(removed > 0)
    }

    /// Redis expires keys on its own, so this is normally a no-op. The count
    /// only includes keys that DEL actually removed.
    async fn purge_expired(&self, prefix: &str) -> Result<usize, DomainError> {
        let mut conn = self.conn().await?;
        let pattern = format!("{}{}", prefix, SESSION_ID_GLOB);

        let mut cursor: u64 = 0;
        let mut scanned = 0usize;
        let mut removed = 0usize;
        loop {
            let (next, keys): (u64, Vec<String>) = cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(upstream)?;

            for key in keys {
                scanned += 1;
                let ttl: i64 = conn.ttl(&key).await.map_err(upstream)?;
                if is_expired_ttl(ttl) {
                    let deleted: i64 = conn.del(&key).await.map_err(upstream)?;
                    removed += deleted.max(0) as usize;
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Redis sweep checked {} keys, removed {}", scanned, removed);
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.conn().await?;
        let _: String = cmd("PING").query_async(&mut conn).await.map_err(upstream)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            RedisStore::new("not-a-redis-url", 4),
            Err(DomainError::ConfigError(_))
        ));
    }

    #[test]
    fn test_only_missing_keys_are_reclaimed() {
        assert!(is_expired_ttl(-2));
        assert!(!is_expired_ttl(-1));
        assert!(!is_expired_ttl(0));
        assert!(!is_expired_ttl(86_400));
    }

    /// Runs only when `CURATOR_TEST_REDIS_URL` points at a disposable server.
    #[tokio::test]
    async fn test_sweep_leaves_live_sessions_and_reports_nothing_removed() {
        let Ok(url) = std::env::var("CURATOR_TEST_REDIS_URL") else {
            return;
        };
        let store = RedisStore::new(&url, 2).unwrap();
        let key = "sweeptest:3f2b8c1e-0d4a-4c6b-9e7f-1a2b3c4d5e6f";
        store.set_ex(key, "{}", Duration::from_secs(60)).await.unwrap();

        let removed = store.purge_expired("sweeptest:").await.unwrap();

        assert_eq!(removed, 0);
        assert!(store.exists(key).await.unwrap());
        store.delete(key).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_upstream_error() {
        // Nothing listens on port 1.
        let store = RedisStore::new("redis://127.0.0.1:1/0", 1).unwrap();
        let err = store.get("any").await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
    }
}
