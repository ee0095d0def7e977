//! Recipient entity.

use serde::{Deserialize, Serialize};

/// The person a package is addressed to. Exactly one per package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Recipient {
    /// Creates a new Recipient instance.
    pub fn new(id: i64, name: String, address: String, phone: String) -> Self {
        Self {
            id,
            name,
            address,
            phone,
        }
    }
}
