//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// A missing key is not an error; `get` reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    Timeout(Duration),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::Timeout(d) => write!(f, "Cache operation timed out after {:?}", d),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Byte-oriented key-value cache.
///
/// Unlike a fail-open cache, implementations report backend failures to the
/// caller; deciding whether a failure is fatal is up to the caller. Tracking
/// lookups treat read errors as misses and absorb write errors, while the
/// key-value facility surfaces them.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` on hit
    /// - `Ok(None)` if the key is absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend is unreachable or the command fails.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`.
    ///
    /// With `ttl = Some(d)` the entry expires after `d` (rounded up to whole
    /// seconds); with `None` it never expires. Overwrites any existing value.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()>;

    /// Removes `key`. Returns `true` if something was deleted.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
