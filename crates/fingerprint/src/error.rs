//! Error types for the fingerprint crate

use thiserror::Error;

/// Errors that can occur when ingesting a loosely-typed value
///
/// These are caller contract violations: the value boundary accepts exactly
/// a string or a flat string-to-string map, and anything else aborts the
/// operation instead of being coerced.
#[derive(Error, Debug)]
pub enum Error {
    /// Value is neither a string nor a flat string map
    #[error("unsupported value shape: expected a string or a flat string map, got {found}")]
    UnsupportedShape {
        /// JSON type name of the rejected value
        found: &'static str,
    },

    /// Map entry holds something other than a string
    #[error("map entry \"{key}\" must be a string, got {found}")]
    NonStringEntry {
        /// Key of the offending entry
        key: String,
        /// JSON type name of the entry value
        found: &'static str,
    },
}

/// Result type for fingerprint operations
pub type Result<T> = std::result::Result<T, Error>;
