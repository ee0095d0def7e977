//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{KvService, LookupSettings, TrackingService};
use crate::domain::TrackingAggregator;
use crate::domain::repositories::TrackingRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub tracking_service: Arc<TrackingService>,
    pub kv_service: Arc<KvService>,
    pub repository: Arc<dyn TrackingRepository>,
    pub cache: Arc<dyn CacheService>,
    pub settings: LookupSettings,
}

impl AppState {
    /// Wires services around a store and a cache.
    pub fn new(
        repository: Arc<dyn TrackingRepository>,
        cache: Arc<dyn CacheService>,
        settings: LookupSettings,
    ) -> Self {
        let aggregator = TrackingAggregator::new(repository.clone(), settings.query_timeout);
        let tracking_service = Arc::new(TrackingService::new(
            aggregator,
            cache.clone(),
            settings,
        ));
        let kv_service = Arc::new(KvService::new(cache.clone(), settings.cache_timeout));

        Self {
            tracking_service,
            kv_service,
            repository,
            cache,
            settings,
        }
    }
}
