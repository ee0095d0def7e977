#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parcel_tracker::application::services::LookupSettings;
use parcel_tracker::domain::entities::{
    LocationInfo, Package, Recipient, TrackingEvent,
};
use parcel_tracker::domain::repositories::{StoreError, TrackingRepository};
use parcel_tracker::infrastructure::cache::{CacheError, CacheResult, CacheService};
use parcel_tracker::state::AppState;

/// In-memory stand-in for the PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryRepository {
    packages: Mutex<HashMap<String, Package>>,
    events: Mutex<HashMap<String, Vec<TrackingEvent>>>,
    recipients: Mutex<HashMap<String, Recipient>>,
    locations: Mutex<HashMap<i64, LocationInfo>>,
    fail_recipient: AtomicBool,
    fail_ping: AtomicBool,
    package_delay: Mutex<Option<Duration>>,
    ping_delay: Mutex<Option<Duration>>,
    package_queries: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&self, sno: &str, status: &str, eta: (i32, u32, u32)) {
        let eta = NaiveDate::from_ymd_opt(eta.0, eta.1, eta.2).unwrap();
        self.packages.lock().unwrap().insert(
            sno.to_string(),
            Package::new(sno.to_string(), status.to_string(), eta),
        );
    }

    pub fn add_event(&self, sno: &str, id: i64, date: &str, time: &str, location_id: i64) {
        let event = TrackingEvent::new(
            id,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            "In Transit".to_string(),
            location_id,
            None,
        );
        self.events
            .lock()
            .unwrap()
            .entry(sno.to_string())
            .or_default()
            .push(event);
    }

    pub fn add_recipient(&self, sno: &str, id: i64, name: &str) {
        self.recipients.lock().unwrap().insert(
            sno.to_string(),
            Recipient::new(
                id,
                name.to_string(),
                "1 Main St".to_string(),
                "555-0100".to_string(),
            ),
        );
    }

    pub fn add_location(&self, id: i64, title: &str) {
        self.locations.lock().unwrap().insert(
            id,
            LocationInfo::new(
                id,
                title.to_string(),
                "Taipei".to_string(),
                format!("{} Depot Rd", id),
            ),
        );
    }

    pub fn fail_recipient_queries(&self) {
        self.fail_recipient.store(true, Ordering::SeqCst);
    }

    pub fn fail_ping(&self) {
        self.fail_ping.store(true, Ordering::SeqCst);
    }

    pub fn delay_package_queries(&self, delay: Duration) {
        *self.package_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_ping(&self, delay: Duration) {
        *self.ping_delay.lock().unwrap() = Some(delay);
    }

    pub fn package_queries(&self) -> usize {
        self.package_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackingRepository for InMemoryRepository {
    async fn find_package(&self, sno: &str) -> Result<Option<Package>, StoreError> {
        self.package_queries.fetch_add(1, Ordering::SeqCst);

        let delay = *self.package_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self.packages.lock().unwrap().get(sno).cloned())
    }

    async fn find_events(&self, sno: &str) -> Result<Vec<TrackingEvent>, StoreError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .get(sno)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_recipient(&self, sno: &str) -> Result<Option<Recipient>, StoreError> {
        if self.fail_recipient.load(Ordering::SeqCst) {
            return Err(StoreError::Database("connection reset by peer".to_string()));
        }
        Ok(self.recipients.lock().unwrap().get(sno).cloned())
    }

    async fn find_location(&self, location_id: i64) -> Result<Option<LocationInfo>, StoreError> {
        Ok(self.locations.lock().unwrap().get(&location_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let delay = *self.ping_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

/// In-memory stand-in for Redis that records TTLs and can be told to fail.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Option<Duration>)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    unhealthy: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, value: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), None));
    }

    pub fn entry(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .and_then(|(_, ttl)| *ttl)
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn mark_unhealthy(&self) {
        self.unhealthy.store(true, Ordering::SeqCst);
    }

    /// Makes every call stall for `delay` before answering.
    pub fn delay_calls(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    async fn stall(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.stall().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        self.stall().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::OperationError("OOM command not allowed".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        self.stall().await;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn health_check(&self) -> bool {
        self.stall().await;
        !self.unhealthy.load(Ordering::SeqCst)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Seeds the documented two-event scenario for `SNO123`.
///
/// Events are inserted latest-first so ordering cannot come from insertion.
pub fn seed_sno123(repo: &InMemoryRepository) {
    repo.add_package("SNO123", "In Transit", (2024, 1, 10));
    repo.add_event("SNO123", 2, "2024-01-09", "09:00", 7);
    repo.add_event("SNO123", 1, "2024-01-08", "10:00", 5);
    repo.add_recipient("SNO123", 1, "Alice");
    repo.add_location(5, "Taoyuan Sorting Center");
    repo.add_location(7, "Taipei Delivery Station");
}

pub fn test_settings() -> LookupSettings {
    LookupSettings {
        cache_ttl: Duration::from_secs(120),
        cache_timeout: Duration::from_millis(200),
        query_timeout: Duration::from_millis(200),
    }
}

pub fn create_test_state(
    repo: Arc<InMemoryRepository>,
    cache: Arc<InMemoryCache>,
) -> AppState {
    AppState::new(repo, cache, test_settings())
}
