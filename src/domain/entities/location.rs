//! Location entity.

use serde::{Deserialize, Serialize};

/// A depot or hub a package can pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub location_id: i64,
    pub title: String,
    pub city: String,
    pub address: String,
}

impl LocationInfo {
    /// Creates a new LocationInfo instance.
    pub fn new(location_id: i64, title: String, city: String, address: String) -> Self {
        Self {
            location_id,
            title,
            city,
            address,
        }
    }
}
