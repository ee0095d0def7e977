//! Business logic services for the application layer.

pub mod kv_service;
pub mod tracking_service;

pub use kv_service::{KvError, KvService, MAX_TTL};
pub use tracking_service::{Lookup, LookupSettings, LookupSource, TrackingService};
