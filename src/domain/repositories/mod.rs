//! Repository trait definitions for the domain layer.
//!
//! The traits abstract data access so the aggregation logic can run against
//! PostgreSQL in production and against mocks or in-memory fakes in tests.
//!
//! # Available Repositories
//!
//! - [`TrackingRepository`] - Packages, events, recipients and locations
//!
//! # Testing
//!
//! See integration tests in `tests/repository_tracking.rs` for usage examples.

pub mod tracking_repository;

pub use tracking_repository::{StoreError, TrackingRepository};

#[cfg(test)]
pub use tracking_repository::MockTrackingRepository;
