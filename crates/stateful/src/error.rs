//! Error types for lifecycle and plan operations

use fingerprint::ValueKind;
use thiserror::Error;

/// Errors that can occur during lifecycle and plan operations
///
/// Every variant is a caller contract violation detected synchronously;
/// there is no transient class and no retry. A failing operation returns
/// before any record is produced, so the host never commits partial state.
#[derive(Error, Debug)]
pub enum Error {
    /// Supplied value does not match the engine's value kind
    #[error("schema violation: expected a {expected} value, got {found}")]
    SchemaViolation {
        /// Kind the engine is fixed to
        expected: ValueKind,
        /// Kind of the rejected value
        found: ValueKind,
    },

    /// Value failed shape validation at the ingestion boundary
    #[error(transparent)]
    Shape(#[from] fingerprint::Error),

    /// Operation requires a created instance
    #[error("identity missing: {operation} requires a created instance")]
    IdentityMissing {
        /// Lifecycle operation that was attempted
        operation: &'static str,
    },
}

/// Result type for lifecycle and plan operations
pub type Result<T> = std::result::Result<T, Error>;
