//! Operational key-value store backed by the cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
use crate::utils::validation::is_valid_kv_key;

/// Namespace prepended to every key, keeping entries apart from tracking records.
const KEY_NAMESPACE: &str = "kv:";

/// Largest accepted value, in bytes.
pub const MAX_VALUE_BYTES: usize = 64 * 1024;

/// Longest accepted entry lifetime: one year.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Errors returned by the key-value facility.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("value is {size} bytes, limit is {max}")]
    ValueTooLarge { size: usize, max: usize },

    #[error("ttl of {seconds}s is outside 1..={max}s")]
    InvalidTtl { seconds: u64, max: u64 },

    #[error("stored value for {0:?} is not valid UTF-8")]
    NotUtf8(String),

    #[error(transparent)]
    Backend(#[from] CacheError),
}

/// Get/put/delete passthrough for operational settings.
///
/// Unlike tracking lookups, the cache is the only store here, so backend
/// failures are surfaced instead of absorbed.
pub struct KvService {
    cache: Arc<dyn CacheService>,
    timeout: Duration,
}

impl KvService {
    /// Creates a new key-value service.
    pub fn new(cache: Arc<dyn CacheService>, timeout: Duration) -> Self {
        Self { cache, timeout }
    }

    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::InvalidKey`] for malformed keys and
    /// [`KvError::Backend`] if the cache fails or times out.
    pub async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let full_key = namespaced(key)?;

        match self.bounded(self.cache.get(&full_key)).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| KvError::NotUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    /// Stores a value, replacing any previous one.
    ///
    /// `ttl = None` keeps the entry until it is deleted. A TTL must be
    /// between one second and [`MAX_TTL`].
    pub async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError> {
        let full_key = namespaced(key)?;

        if let Some(ttl) = ttl.filter(|t| *t < Duration::from_secs(1) || *t > MAX_TTL) {
            return Err(KvError::InvalidTtl {
                seconds: ttl.as_secs(),
                max: MAX_TTL.as_secs(),
            });
        }

        if value.len() > MAX_VALUE_BYTES {
            return Err(KvError::ValueTooLarge {
                size: value.len(),
                max: MAX_VALUE_BYTES,
            });
        }

        self.bounded(self.cache.set(&full_key, value.as_bytes(), ttl))
            .await?;
        info!(key, ttl = ?ttl, "Stored key-value entry");

        Ok(())
    }

    /// Deletes a value. Returns `true` if the key existed.
    pub async fn delete(&self, key: &str) -> Result<bool, KvError> {
        let full_key = namespaced(key)?;
        let deleted = self.bounded(self.cache.delete(&full_key)).await?;

        if deleted {
            info!(key, "Deleted key-value entry");
        }

        Ok(deleted)
    }

    async fn bounded<T>(&self, op: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.timeout, op)
            .await
            .unwrap_or(Err(CacheError::Timeout(self.timeout)))
    }
}

fn namespaced(key: &str) -> Result<String, KvError> {
    if !is_valid_kv_key(key) {
        return Err(KvError::InvalidKey(key.to_string()));
    }
    Ok(format!("{KEY_NAMESPACE}{key}"))
}
