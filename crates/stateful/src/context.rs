//! Provider traits for host-supplied collaborators
//!
//! These traits let the crate be used without depending on specific
//! identity or persistence implementations.

use crate::record::Record;
use anyhow::Result;
use std::collections::HashMap;

/// Source of opaque instance identities
///
/// Implement this trait to control how identities are minted at create
/// time. Tokens must be globally unique; an identity is assigned once and
/// never reused.
pub trait IdentityGenerator: Send + Sync {
    /// Mint a fresh identity token
    fn mint(&self) -> String;
}

/// Default generator: random version-4 UUIDs in canonical form
#[derive(Debug, Default)]
pub struct UuidIdentity;

impl IdentityGenerator for UuidIdentity {
    fn mint(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Persistence contract the host implements
///
/// The host supplies the full prior record on every lifecycle call and
/// durably stores the returned record; the engine itself holds nothing
/// between calls. The host also serializes all operations for a given
/// identity.
pub trait RecordStore: Send + Sync {
    /// Load the record for an identity, if one exists
    fn load(&self, identity: &str) -> Result<Option<Record>>;

    /// Durably store a record under its identity
    fn store(&mut self, record: &Record) -> Result<()>;

    /// Remove the record for an identity
    fn remove(&mut self, identity: &str) -> Result<()>;
}

/// In-process store backed by a `HashMap`
///
/// Suitable for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Record>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, identity: &str) -> Result<Option<Record>> {
        Ok(self.records.get(identity).cloned())
    }

    fn store(&mut self, record: &Record) -> Result<()> {
        self.records.insert(record.identity.clone(), record.clone());
        Ok(())
    }

    fn remove(&mut self, identity: &str) -> Result<()> {
        self.records.remove(identity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint::AttributeValue;

    #[test]
    fn test_uuid_identities_are_canonical_and_unique() {
        let generator = UuidIdentity;
        let first = generator.mint();
        let second = generator.mint();

        assert_eq!(first.len(), 36);
        assert_eq!(first.matches('-').count(), 4);
        assert_ne!(first, second);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        let record = Record {
            identity: "a1b2".to_string(),
            desired: AttributeValue::string("foo"),
            real: None,
            fingerprint: "00".repeat(32),
        };

        store.store(&record).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("a1b2").unwrap(), Some(record));
        assert_eq!(store.load("missing").unwrap(), None);

        store.remove("a1b2").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.load("a1b2").unwrap(), None);
    }
}
