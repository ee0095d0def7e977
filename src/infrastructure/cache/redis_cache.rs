//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Keys are stored verbatim; callers choose their own namespaces.
#[derive(Clone)]
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

/// Maps a Redis failure into a cache error, separating transport problems.
fn command_error(op: &str, key: &str, e: RedisError) -> CacheError {
    if e.is_io_error() {
        CacheError::ConnectionError(format!("{} {}: {}", op, key, e))
    } else {
        CacheError::OperationError(format!("{} {}: {}", op, key, e))
    }
}

/// Converts a TTL to whole seconds, never below one.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| command_error("GET", key, e))?;

        match &value {
            Some(bytes) => debug!("Cache HIT: {} ({} bytes)", key, bytes.len()),
            None => debug!("Cache MISS: {}", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.client.clone();

        match ttl {
            Some(ttl) => {
                let secs = ttl_seconds(ttl);
                conn.set_ex::<_, _, ()>(key, value, secs)
                    .await
                    .map_err(|e| command_error("SETEX", key, e))?;
                debug!("Cache SET: {} (TTL: {}s)", key, secs);
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| command_error("SET", key, e))?;
                debug!("Cache SET: {} (no expiry)", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(key)
            .await
            .map_err(|e| command_error("DEL", key, e))?;

        if deleted > 0 {
            debug!("Cache DELETE: {}", key);
        }

        Ok(deleted > 0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
