//! Application layer services implementing the lookup logic.
//!
//! This layer orchestrates domain operations by coordinating the aggregator
//! and the cache. Services consume trait objects and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::tracking_service::TrackingService`] - Cache-aside tracking lookups
//! - [`services::kv_service::KvService`] - Operational key-value entries

pub mod services;
