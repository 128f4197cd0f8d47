//! Canonical serialization and digest reduction

use crate::value::AttributeValue;
use sha2::{Digest, Sha256};

/// Serialize a value to its canonical JSON form
///
/// Compact encoding with map keys in sorted order: two structurally equal
/// values always produce byte-identical output, whatever the original
/// insertion order of their entries.
pub fn canonical_json(value: &AttributeValue) -> String {
    serde_json::Value::from(value).to_string()
}

/// Reduce a value to its fingerprint
///
/// SHA-256 over the canonical JSON bytes, rendered as 64 lowercase hex
/// characters. Pure and total: any constructed [`AttributeValue`] has a
/// fingerprint.
pub fn fingerprint(value: &AttributeValue) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(value).as_bytes());
    hex::encode(hasher.finalize())
}
