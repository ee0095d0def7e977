//! Domain layer containing tracking entities and record assembly.
//!
//! This module is independent of infrastructure concerns: it defines the data
//! model, the repository contract the store must satisfy, and the logic that
//! turns four repository queries into one consistent record.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`aggregator`] - Composite record assembly
//! - [`errors`] - Lookup error taxonomy
//!
//! # Lookup Flow
//!
//! 1. HTTP handler validates the tracking number
//! 2. [`crate::application::services::TrackingService`] checks the cache
//! 3. On a miss, [`aggregator::TrackingAggregator`] queries the store
//! 4. The assembled record is written back to the cache

pub mod aggregator;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use aggregator::TrackingAggregator;
pub use errors::{AssemblyStep, PayloadOp, TrackingError};
