//! Repository trait for tracking data access.

use crate::domain::entities::{LocationInfo, Package, Recipient, TrackingEvent};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single relational query.
///
/// "No rows" is only an error where a row is mandatory; lookups that may
/// legitimately find nothing return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no rows returned")]
    NoRows,

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NoRows,
            sqlx::Error::PoolTimedOut => Self::Database("connection pool timed out".to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Read-only access to the four tracking tables.
///
/// Every query is keyed by tracking number except [`Self::find_location`],
/// which resolves a location reference taken from an event.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTrackingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Fetches the base package row.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Package))` if found
    /// - `Ok(None)` if no package has this tracking number
    async fn find_package(&self, sno: &str) -> Result<Option<Package>, StoreError>;

    /// Fetches the full movement history, oldest first.
    ///
    /// An empty vector is a valid result for packages that have not moved yet.
    async fn find_events(&self, sno: &str) -> Result<Vec<TrackingEvent>, StoreError>;

    /// Fetches the recipient of a package.
    async fn find_recipient(&self, sno: &str) -> Result<Option<Recipient>, StoreError>;

    /// Resolves a location by id.
    async fn find_location(&self, location_id: i64) -> Result<Option<LocationInfo>, StoreError>;

    /// Checks that the store answers queries. Used by health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
