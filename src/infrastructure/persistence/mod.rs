//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgTrackingRepository`] - Packages, events, recipients and locations

pub mod pg_tracking_repository;

pub use pg_tracking_repository::PgTrackingRepository;
