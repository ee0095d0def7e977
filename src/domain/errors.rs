//! Error kinds produced by the tracking lookup path.

use std::fmt;
use thiserror::Error;

use crate::domain::repositories::StoreError;

/// Query step of record assembly, used to report which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStep {
    Package,
    Events,
    Recipient,
    Location,
}

impl fmt::Display for AssemblyStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Package => "package",
            Self::Events => "events",
            Self::Recipient => "recipient",
            Self::Location => "location",
        };
        f.write_str(name)
    }
}

/// Direction of a cache payload conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOp {
    Encode,
    Decode,
}

impl fmt::Display for PayloadOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

/// Failure of a single tracking lookup. Never fatal to the process.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// No package row exists for the tracking number.
    #[error("tracking number {0} not found")]
    NotFound(String),

    /// A relational query failed; assembly was aborted.
    #[error("{step} query failed: {source}")]
    Store {
        step: AssemblyStep,
        #[source]
        source: StoreError,
    },

    /// A cache payload could not be decoded, or a record could not be encoded.
    #[error("failed to {op} tracking record for {sno}: {source}")]
    Serialization {
        sno: String,
        op: PayloadOp,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackingError {
    pub(crate) fn store(step: AssemblyStep, source: StoreError) -> Self {
        Self::Store { step, source }
    }

    /// Returns true if the failure was a query timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: StoreError::Timeout(_),
                ..
            }
        )
    }
}
