//! Package entities: the base row and the assembled tracking record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{LocationInfo, Recipient, TrackingEvent};

/// Base row of a tracked package, as stored in the `packages` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub sno: String,
    pub tracking_status: String,
    pub estimated_delivery: NaiveDate,
}

impl Package {
    /// Creates a new Package instance.
    pub fn new(sno: String, tracking_status: String, estimated_delivery: NaiveDate) -> Self {
        Self {
            sno,
            tracking_status,
            estimated_delivery,
        }
    }
}

/// Composite tracking result for one tracking number.
///
/// Only ever built when every constituent query succeeded. The JSON form of
/// this struct is also the cache payload, so field names are part of the
/// persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub sno: String,
    pub tracking_status: String,
    pub estimated_delivery: NaiveDate,
    /// Movement history, oldest first.
    pub details: Vec<TrackingEvent>,
    pub recipient: Recipient,
    /// Location of the most recent event; `None` while the package has no history.
    pub current_location: Option<LocationInfo>,
}

impl TrackingRecord {
    /// Returns the most recent event, if any.
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.details.last()
    }
}
