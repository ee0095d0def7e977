//! Assembly of a tracking record from the relational store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::entities::TrackingRecord;
use crate::domain::errors::{AssemblyStep, TrackingError};
use crate::domain::repositories::{StoreError, TrackingRepository};

/// Builds [`TrackingRecord`]s by composing four repository queries.
///
/// # Assembly Steps
///
/// 1. Package row by exact tracking number (missing row is [`TrackingError::NotFound`])
/// 2. Movement history (may be empty)
/// 3. Recipient (exactly one required)
/// 4. Location of the latest event, skipped when there is no history
///
/// Any failing step aborts assembly, so a partially built record is never
/// returned. Each query runs under `query_timeout`.
///
/// The latest event is the one with the greatest `(date, time)`; among events
/// sharing that instant the highest `id` wins.
pub struct TrackingAggregator {
    repository: Arc<dyn TrackingRepository>,
    query_timeout: Duration,
}

impl TrackingAggregator {
    /// Creates a new aggregator.
    pub fn new(repository: Arc<dyn TrackingRepository>, query_timeout: Duration) -> Self {
        Self {
            repository,
            query_timeout,
        }
    }

    /// Assembles the full record for `sno`.
    ///
    /// # Errors
    ///
    /// - [`TrackingError::NotFound`] if no package has this tracking number
    /// - [`TrackingError::Store`] naming the step that failed otherwise
    pub async fn assemble(&self, sno: &str) -> Result<TrackingRecord, TrackingError> {
        let package = self
            .bounded(AssemblyStep::Package, self.repository.find_package(sno))
            .await?
            .ok_or_else(|| TrackingError::NotFound(sno.to_string()))?;

        let mut details = self
            .bounded(AssemblyStep::Events, self.repository.find_events(sno))
            .await?;
        details.sort_by_key(|event| event.chronology());

        let recipient = self
            .bounded(AssemblyStep::Recipient, self.repository.find_recipient(sno))
            .await?
            .ok_or_else(|| TrackingError::store(AssemblyStep::Recipient, StoreError::NoRows))?;

        let current_location = match details.last() {
            Some(latest) => {
                let location = self
                    .bounded(
                        AssemblyStep::Location,
                        self.repository.find_location(latest.location_id),
                    )
                    .await?
                    .ok_or_else(|| {
                        TrackingError::store(AssemblyStep::Location, StoreError::NoRows)
                    })?;
                Some(location)
            }
            None => None,
        };

        debug!(sno, events = details.len(), "Assembled tracking record");

        Ok(TrackingRecord {
            sno: package.sno,
            tracking_status: package.tracking_status,
            estimated_delivery: package.estimated_delivery,
            details,
            recipient,
            current_location,
        })
    }

    /// Runs one query under the query timeout, tagging failures with `step`.
    async fn bounded<T, F>(&self, step: AssemblyStep, query: F) -> Result<T, TrackingError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(|source| TrackingError::store(step, source)),
            Err(_) => Err(TrackingError::store(
                step,
                StoreError::Timeout(self.query_timeout),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocationInfo, Package, Recipient, TrackingEvent};
    use crate::domain::repositories::MockTrackingRepository;
    use chrono::{NaiveDate, NaiveTime};
    use mockall::predicate::eq;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn package(sno: &str) -> Package {
        Package::new(
            sno.to_string(),
            "In Transit".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    fn event(id: i64, day: u32, hour: u32, location_id: i64) -> TrackingEvent {
        TrackingEvent::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            "In Transit".to_string(),
            location_id,
            None,
        )
    }

    fn recipient() -> Recipient {
        Recipient::new(
            1,
            "Alice".to_string(),
            "1 Main St".to_string(),
            "555-0100".to_string(),
        )
    }

    fn location(id: i64) -> LocationInfo {
        LocationInfo::new(
            id,
            format!("Hub {id}"),
            "Taipei".to_string(),
            "Depot Rd".to_string(),
        )
    }

    fn aggregator(repo: MockTrackingRepository) -> TrackingAggregator {
        TrackingAggregator::new(Arc::new(repo), TIMEOUT)
    }

    #[tokio::test]
    async fn test_assemble_resolves_latest_event_location() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        // Later event inserted first
        repo.expect_find_events()
            .returning(|_| Ok(vec![event(2, 9, 9, 7), event(1, 8, 10, 5)]));
        repo.expect_find_recipient()
            .returning(|_| Ok(Some(recipient())));
        repo.expect_find_location()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(Some(location(id))));

        let record = aggregator(repo).assemble("SNO123").await.unwrap();

        assert_eq!(record.sno, "SNO123");
        assert_eq!(record.current_location.unwrap().location_id, 7);
        let ids: Vec<i64> = record.details.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_assemble_tie_on_latest_instant_picks_highest_id() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events()
            .returning(|_| Ok(vec![event(4, 9, 9, 40), event(3, 9, 9, 30), event(1, 8, 9, 10)]));
        repo.expect_find_recipient()
            .returning(|_| Ok(Some(recipient())));
        repo.expect_find_location()
            .with(eq(40))
            .times(1)
            .returning(|id| Ok(Some(location(id))));

        let record = aggregator(repo).assemble("TIE1").await.unwrap();

        assert_eq!(record.current_location.unwrap().location_id, 40);
    }

    #[tokio::test]
    async fn test_assemble_without_events_skips_location() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events().returning(|_| Ok(vec![]));
        repo.expect_find_recipient()
            .returning(|_| Ok(Some(recipient())));
        repo.expect_find_location().times(0);

        let record = aggregator(repo).assemble("NEW1").await.unwrap();

        assert!(record.details.is_empty());
        assert!(record.current_location.is_none());
    }

    #[tokio::test]
    async fn test_assemble_missing_package_is_not_found() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package().returning(|_| Ok(None));
        repo.expect_find_events().times(0);
        repo.expect_find_recipient().times(0);

        let result = aggregator(repo).assemble("NOPE").await;

        assert!(matches!(result, Err(TrackingError::NotFound(sno)) if sno == "NOPE"));
    }

    #[tokio::test]
    async fn test_assemble_recipient_failure_aborts() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events()
            .returning(|_| Ok(vec![event(1, 8, 10, 5)]));
        repo.expect_find_recipient()
            .returning(|_| Err(StoreError::Database("connection reset".to_string())));
        repo.expect_find_location().times(0);

        let result = aggregator(repo).assemble("SNO123").await;

        assert!(matches!(
            result,
            Err(TrackingError::Store {
                step: AssemblyStep::Recipient,
                source: StoreError::Database(_)
            })
        ));
    }

    #[tokio::test]
    async fn test_assemble_missing_recipient_is_store_error() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events().returning(|_| Ok(vec![]));
        repo.expect_find_recipient().returning(|_| Ok(None));

        let result = aggregator(repo).assemble("SNO123").await;

        assert!(matches!(
            result,
            Err(TrackingError::Store {
                step: AssemblyStep::Recipient,
                source: StoreError::NoRows
            })
        ));
    }

    #[tokio::test]
    async fn test_assemble_dangling_location_reference_is_store_error() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events()
            .returning(|_| Ok(vec![event(1, 8, 10, 99)]));
        repo.expect_find_recipient()
            .returning(|_| Ok(Some(recipient())));
        repo.expect_find_location().returning(|_| Ok(None));

        let result = aggregator(repo).assemble("SNO123").await;

        assert!(matches!(
            result,
            Err(TrackingError::Store {
                step: AssemblyStep::Location,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_assemble_events_failure_names_step() {
        let mut repo = MockTrackingRepository::new();
        repo.expect_find_package()
            .returning(|sno| Ok(Some(package(sno))));
        repo.expect_find_events()
            .returning(|_| Err(StoreError::Database("bad row".to_string())));

        let err = aggregator(repo).assemble("SNO123").await.unwrap_err();

        assert_eq!(err.to_string(), "events query failed: database error: bad row");
    }
}
