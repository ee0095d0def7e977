//! PostgreSQL implementation of tracking repository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{LocationInfo, Package, Recipient, TrackingEvent};
use crate::domain::repositories::{StoreError, TrackingRepository};

/// PostgreSQL repository for package tracking data.
///
/// Uses SQLx prepared statements for SQL injection protection. All queries are
/// read-only and run outside any transaction.
pub struct PgTrackingRepository {
    pool: Arc<PgPool>,
}

impl PgTrackingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PackageRow {
    sno: String,
    tracking_status: String,
    estimated_delivery: NaiveDate,
}

impl From<PackageRow> for Package {
    fn from(r: PackageRow) -> Self {
        Package::new(r.sno, r.tracking_status, r.estimated_delivery)
    }
}

#[derive(FromRow)]
struct EventRow {
    id: i64,
    date: NaiveDate,
    time: NaiveTime,
    status: String,
    location_id: i64,
    location_title: Option<String>,
}

impl From<EventRow> for TrackingEvent {
    fn from(r: EventRow) -> Self {
        TrackingEvent::new(
            r.id,
            r.date,
            r.time,
            r.status,
            r.location_id,
            r.location_title,
        )
    }
}

#[derive(FromRow)]
struct RecipientRow {
    id: i64,
    name: String,
    address: String,
    phone: String,
}

impl From<RecipientRow> for Recipient {
    fn from(r: RecipientRow) -> Self {
        Recipient::new(r.id, r.name, r.address, r.phone)
    }
}

#[derive(FromRow)]
struct LocationRow {
    location_id: i64,
    title: String,
    city: String,
    address: String,
}

impl From<LocationRow> for LocationInfo {
    fn from(r: LocationRow) -> Self {
        LocationInfo::new(r.location_id, r.title, r.city, r.address)
    }
}

#[async_trait]
impl TrackingRepository for PgTrackingRepository {
    async fn find_package(&self, sno: &str) -> Result<Option<Package>, StoreError> {
        let row = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT sno, tracking_status, estimated_delivery
            FROM packages
            WHERE sno = $1
            "#,
        )
        .bind(sno)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Package::from))
    }

    async fn find_events(&self, sno: &str) -> Result<Vec<TrackingEvent>, StoreError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT d.id, d.date, d.time, d.status, d.location_id, l.title AS location_title
            FROM tracking_details d
            LEFT JOIN locations l ON l.location_id = d.location_id
            WHERE d.sno = $1
            ORDER BY d.date, d.time, d.id
            "#,
        )
        .bind(sno)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(TrackingEvent::from).collect())
    }

    async fn find_recipient(&self, sno: &str) -> Result<Option<Recipient>, StoreError> {
        let row = sqlx::query_as::<_, RecipientRow>(
            r#"
            SELECT id, name, address, phone
            FROM recipients
            WHERE sno = $1
            "#,
        )
        .bind(sno)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Recipient::from))
    }

    async fn find_location(&self, location_id: i64) -> Result<Option<LocationInfo>, StoreError> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT location_id, title, city, address
            FROM locations
            WHERE location_id = $1
            "#,
        )
        .bind(location_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LocationInfo::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
