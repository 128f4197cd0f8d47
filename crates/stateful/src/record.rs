//! The persisted record for a single resource instance

use fingerprint::AttributeValue;
use serde::{Deserialize, Serialize};

/// Full persisted state of one resource instance
///
/// The host owns persistence: every lifecycle call receives the prior record
/// and durably stores the returned one, and the engine retains nothing
/// between calls. `fingerprint` is derived from `desired` only and must
/// never be persisted stale relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque token minted at create time, stable for the instance lifetime
    pub identity: String,
    /// Authoritative target state
    pub desired: AttributeValue,
    /// Last externally observed state, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<AttributeValue>,
    /// Lowercase hex SHA-256 of the canonical form of `desired`
    pub fingerprint: String,
}

impl Record {
    /// Whether this record belongs to a created instance
    ///
    /// An empty identity is the absent sentinel; only create may act on it.
    pub fn is_present(&self) -> bool {
        !self.identity.is_empty()
    }

    /// Whether an external observation is on record
    pub fn has_observation(&self) -> bool {
        self.real.is_some()
    }
}
