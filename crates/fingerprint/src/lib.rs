//! # Fingerprint
//!
//! Canonical serialization and content fingerprinting for reconciled state.
//!
//! This crate provides functionality to:
//! - Represent an attribute value as a closed variant: an opaque string or a
//!   flat string-to-string map
//! - Serialize a value to a canonical byte form, insensitive to map key order
//! - Reduce the canonical form to a SHA-256 digest usable as a change trigger
//!
//! ## Example
//!
//! ```
//! use fingerprint::AttributeValue;
//!
//! let value = AttributeValue::map([("foo", "bar")]);
//!
//! // Sorted-key compact JSON, so structurally equal values always
//! // serialize to identical bytes.
//! assert_eq!(fingerprint::canonical_json(&value), r#"{"foo":"bar"}"#);
//!
//! // 64 lowercase hex characters of SHA-256.
//! let digest = fingerprint::fingerprint(&value);
//! assert_eq!(digest.len(), 64);
//! ```

mod digest;
mod error;
mod value;

pub use digest::{canonical_json, fingerprint};
pub use error::{Error, Result};
pub use value::{AttributeValue, ValueKind};
