//! Core domain entities representing the tracking data model.
//!
//! Entities are plain data structures without I/O. The tracking record and its
//! parts derive Serde traits because their JSON form doubles as the cache
//! payload.
//!
//! # Entity Types
//!
//! - [`Package`] - Base package row (status and ETA)
//! - [`TrackingEvent`] - One entry of the movement history
//! - [`Recipient`] - Addressee of a package
//! - [`LocationInfo`] - A depot or hub
//! - [`TrackingRecord`] - The assembled composite of all of the above

pub mod location;
pub mod package;
pub mod recipient;
pub mod tracking_event;

pub use location::LocationInfo;
pub use package::{Package, TrackingRecord};
pub use recipient::Recipient;
pub use tracking_event::TrackingEvent;
