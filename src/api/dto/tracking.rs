//! DTOs for tracking lookup endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::TrackingRecord;
use crate::utils::validation::TRACKING_NUMBER_REGEX;

/// Query string of `GET /query`.
#[derive(Debug, Deserialize, Validate)]
pub struct TrackingQuery {
    /// Tracking number; a missing parameter deserializes as empty and fails validation.
    #[serde(default)]
    #[validate(regex(
        path = *TRACKING_NUMBER_REGEX,
        message = "sno must be 1-64 letters, digits, '-' or '_'"
    ))]
    pub sno: String,
}

/// Successful lookup response.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub status: &'static str,
    pub data: TrackingRecord,
}

impl TrackingResponse {
    pub fn success(data: TrackingRecord) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sno_fails_validation() {
        let q: TrackingQuery = serde_json::from_str("{}").unwrap();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_valid_sno_passes() {
        let q = TrackingQuery {
            sno: "SNO123".to_string(),
        };
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_sno_with_colon_fails() {
        let q = TrackingQuery {
            sno: "kv:secret".to_string(),
        };
        assert!(q.validate().is_err());
    }
}
