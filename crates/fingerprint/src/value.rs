//! The closed value variant for resource attributes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shape of an attribute value
///
/// A resource variant is fixed to a single kind for its whole lifetime;
/// kinds are never mixed within one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Opaque string value
    String,
    /// Flat string-to-string map
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Map => "map",
        })
    }
}

/// An attribute value: an opaque string or a flat string-to-string map
///
/// The map variant is backed by a `BTreeMap`, so key order is canonical by
/// construction and structural equality ignores insertion order. Equality is
/// exact: a map with extra or missing keys is simply a different value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Opaque string
    String(String),
    /// Flat string map
    Map(BTreeMap<String, String>),
}

impl AttributeValue {
    /// Build a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build a map value from key/value pairs
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Map(_) => ValueKind::Map,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<BTreeMap<String, String>> for AttributeValue {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::Map(entries)
    }
}

impl TryFrom<serde_json::Value> for AttributeValue {
    type Error = Error;

    /// Ingest a loosely-typed value from the host
    ///
    /// Accepts a JSON string or a flat object whose entries are all strings.
    /// Everything else is a contract violation and is rejected, never coerced.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(value) => Ok(Self::String(value)),
            serde_json::Value::Object(entries) => {
                let mut map = BTreeMap::new();
                for (key, entry) in entries {
                    match entry {
                        serde_json::Value::String(value) => {
                            map.insert(key, value);
                        }
                        other => {
                            return Err(Error::NonStringEntry {
                                key,
                                found: json_type_name(&other),
                            });
                        }
                    }
                }
                Ok(Self::Map(map))
            }
            other => Err(Error::UnsupportedShape {
                found: json_type_name(&other),
            }),
        }
    }
}

impl From<&AttributeValue> for serde_json::Value {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::String(value) => Self::String(value.clone()),
            AttributeValue::Map(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::String(value.clone())))
                    .collect(),
            ),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
