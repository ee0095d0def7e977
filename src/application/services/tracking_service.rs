//! Cache-aside tracking lookup service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::TrackingRecord;
use crate::domain::{PayloadOp, TrackingAggregator, TrackingError};
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Cache,
    Store,
}

/// Successful lookup: the record plus its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub record: TrackingRecord,
    pub source: LookupSource,
}

/// Tunables for the lookup path.
#[derive(Debug, Clone, Copy)]
pub struct LookupSettings {
    /// Lifetime of every cache entry written by a lookup. Not renewed on hit.
    pub cache_ttl: Duration,
    /// Upper bound for a single cache read or write.
    pub cache_timeout: Duration,
    /// Upper bound for a single relational query.
    pub query_timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(120),
            cache_timeout: Duration::from_millis(500),
            query_timeout: Duration::from_secs(2),
        }
    }
}

/// Serves tracking lookups cache-first.
///
/// # Lookup Flow
///
/// 1. Read the cache entry keyed by the tracking number
/// 2. **Hit**: decode and return; a corrupt payload is an error, not a miss
/// 3. **Miss or cache error**: assemble the record from the store
/// 4. Write the record back with a fixed TTL; write failures are logged only
///
/// Not-found and store failures are never cached. The store is never written.
///
/// # Metrics
///
/// Outcomes are counted through the `metrics` facade:
/// `tracking_cache_hits_total`, `tracking_cache_misses_total`,
/// `tracking_cache_degraded_total`, `tracking_cache_corrupt_total` and
/// `tracking_cache_write_failures_total`. The service does not install a
/// recorder; counters are dropped until the embedding process installs one.
pub struct TrackingService {
    aggregator: TrackingAggregator,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
    cache_timeout: Duration,
}

impl TrackingService {
    /// Creates a new tracking service.
    pub fn new(
        aggregator: TrackingAggregator,
        cache: Arc<dyn CacheService>,
        settings: LookupSettings,
    ) -> Self {
        Self {
            aggregator,
            cache,
            cache_ttl: settings.cache_ttl,
            cache_timeout: settings.cache_timeout,
        }
    }

    /// Looks up the tracking record for `sno`.
    ///
    /// The caller is responsible for rejecting empty or malformed tracking numbers.
    ///
    /// # Errors
    ///
    /// - [`TrackingError::NotFound`] if the package does not exist
    /// - [`TrackingError::Store`] if a relational query failed
    /// - [`TrackingError::Serialization`] if a cached payload cannot be decoded
    ///   or the assembled record cannot be encoded
    pub async fn lookup(&self, sno: &str) -> Result<Lookup, TrackingError> {
        match self.bounded(self.cache.get(sno)).await {
            Ok(Some(payload)) => {
                let record = serde_json::from_slice::<TrackingRecord>(&payload).map_err(|source| {
                    metrics::counter!("tracking_cache_corrupt_total").increment(1);
                    TrackingError::Serialization {
                        sno: sno.to_string(),
                        op: PayloadOp::Decode,
                        source,
                    }
                })?;

                metrics::counter!("tracking_cache_hits_total").increment(1);
                debug!(sno, "Served tracking record from cache");

                return Ok(Lookup {
                    record,
                    source: LookupSource::Cache,
                });
            }
            Ok(None) => {
                metrics::counter!("tracking_cache_misses_total").increment(1);
                debug!(sno, "Tracking cache miss");
            }
            Err(e) => {
                metrics::counter!("tracking_cache_degraded_total").increment(1);
                warn!(sno, error = %e, "Cache read failed, falling back to store");
            }
        }

        let record = self.aggregator.assemble(sno).await?;

        let payload = serde_json::to_vec(&record).map_err(|source| TrackingError::Serialization {
            sno: sno.to_string(),
            op: PayloadOp::Encode,
            source,
        })?;

        if let Err(e) = self
            .bounded(self.cache.set(sno, &payload, Some(self.cache_ttl)))
            .await
        {
            metrics::counter!("tracking_cache_write_failures_total").increment(1);
            warn!(sno, error = %e, "Failed to cache tracking record");
        }

        Ok(Lookup {
            record,
            source: LookupSource::Store,
        })
    }

    /// Runs one cache call under the cache timeout.
    async fn bounded<T>(&self, op: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.cache_timeout, op)
            .await
            .unwrap_or(Err(CacheError::Timeout(self.cache_timeout)))
    }
}
