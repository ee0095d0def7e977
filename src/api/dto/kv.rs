//! DTOs for the key-value endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters of `PUT /kv/{key}`.
///
/// Uses `serde_with` to parse the TTL from the query string.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct KvPutParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

/// A stored key-value entry.
#[derive(Debug, Serialize)]
pub struct KvEntryResponse {
    pub key: String,
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
}
