//! Lifecycle engine for reconciled-state resources

use crate::context::{IdentityGenerator, UuidIdentity};
use crate::diff::{plan_diff, PlanDecision};
use crate::error::{Error, Result};
use crate::record::Record;
use fingerprint::{fingerprint, AttributeValue, ValueKind};
use log::debug;

/// Lifecycle engine for one resource variant
///
/// An engine is fixed to a single value kind; the string and map variants
/// are two parameterizations of the same machinery, constructed explicitly
/// rather than registered in shared process state. All operations are
/// synchronous and take the full prior record: the engine keeps nothing
/// between calls, so distinct instances can be driven concurrently by the
/// host with no coordination here.
pub struct Engine<G = UuidIdentity> {
    kind: ValueKind,
    identities: G,
}

impl Engine<UuidIdentity> {
    /// Engine for opaque-string values with UUID identities
    pub fn strings() -> Self {
        Self::with_generator(ValueKind::String, UuidIdentity)
    }

    /// Engine for string-map values with UUID identities
    pub fn maps() -> Self {
        Self::with_generator(ValueKind::Map, UuidIdentity)
    }
}

impl<G: IdentityGenerator> Engine<G> {
    /// Engine with a custom identity source
    pub fn with_generator(kind: ValueKind, identities: G) -> Self {
        Self { kind, identities }
    }

    /// Value kind this engine accepts
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Create a new instance
    ///
    /// Mints a fresh identity and derives the fingerprint from `desired`.
    /// The observation stays absent unless the host supplies an initial one.
    pub fn create(
        &self,
        desired: AttributeValue,
        real: Option<AttributeValue>,
    ) -> Result<Record> {
        self.expect_kind(&desired)?;
        if let Some(observed) = &real {
            self.expect_kind(observed)?;
        }

        let identity = self.identities.mint();
        let digest = fingerprint(&desired);
        debug!("created instance {identity} with fingerprint {digest}");

        Ok(Record {
            identity,
            desired,
            real,
            fingerprint: digest,
        })
    }

    /// Refresh derived state
    ///
    /// Recomputes the fingerprint from the recorded desired value without
    /// altering the value itself. Idempotent, and repairs a fingerprint the
    /// host persisted stale.
    pub fn read(&self, prior: &Record) -> Result<Record> {
        self.expect_present(prior, "read")?;
        self.expect_kind(&prior.desired)?;

        let mut next = prior.clone();
        next.fingerprint = fingerprint(&next.desired);
        Ok(next)
    }

    /// Replace the desired value
    ///
    /// The identity never changes: an edit to desired state is a pure state
    /// replacement, not a destructive recreate. The recorded observation is
    /// carried over untouched.
    pub fn update(&self, prior: &Record, desired: AttributeValue) -> Result<Record> {
        self.expect_present(prior, "update")?;
        self.expect_kind(&desired)?;

        let digest = fingerprint(&desired);
        debug!(
            "updated instance {}: fingerprint {} -> {}",
            prior.identity, prior.fingerprint, digest
        );

        Ok(Record {
            identity: prior.identity.clone(),
            desired,
            real: prior.real.clone(),
            fingerprint: digest,
        })
    }

    /// Discard an instance
    ///
    /// The host drops the record afterwards; no further operations are valid
    /// on the identity.
    pub fn delete(&self, prior: &Record) -> Result<()> {
        self.expect_present(prior, "delete")?;
        debug!("deleted instance {}", prior.identity);
        Ok(())
    }

    /// Pre-flight diff decision for a proposed desired value
    ///
    /// Validates the proposal against the engine kind and delegates to
    /// [`plan_diff`]. The host applies the decision before committing any
    /// create or update.
    pub fn plan(&self, proposed: &AttributeValue, prior: &Record) -> Result<PlanDecision> {
        self.expect_kind(proposed)?;
        plan_diff(proposed, &prior.desired, prior.real.as_ref())
    }

    fn expect_kind(&self, value: &AttributeValue) -> Result<()> {
        if value.kind() == self.kind {
            Ok(())
        } else {
            Err(Error::SchemaViolation {
                expected: self.kind,
                found: value.kind(),
            })
        }
    }

    fn expect_present(&self, record: &Record, operation: &'static str) -> Result<()> {
        if record.is_present() {
            Ok(())
        } else {
            Err(Error::IdentityMissing { operation })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DigestAction, FieldAction};

    const FOO_BAR_DIGEST: &str =
        "7a38bf81f383f69433ad6e900d35b3e2385593f76a7b7ab5d4355b8ba41ee24b";

    struct FixedIdentity(&'static str);

    impl IdentityGenerator for FixedIdentity {
        fn mint(&self) -> String {
            self.0.to_string()
        }
    }

    fn absent(desired: AttributeValue) -> Record {
        Record {
            identity: String::new(),
            desired,
            real: None,
            fingerprint: String::new(),
        }
    }

    #[test]
    fn test_create_mints_identity_and_fingerprint() {
        let engine = Engine::maps();
        let record = engine
            .create(AttributeValue::map([("foo", "bar")]), None)
            .unwrap();

        assert_eq!(record.identity.len(), 36);
        assert_eq!(record.fingerprint, FOO_BAR_DIGEST);
        assert_eq!(record.real, None);
    }

    #[test]
    fn test_create_identities_are_not_reused() {
        let engine = Engine::strings();
        let first = engine.create(AttributeValue::string("foo"), None).unwrap();
        let second = engine.create(AttributeValue::string("foo"), None).unwrap();
        assert_ne!(first.identity, second.identity);
    }

    #[test]
    fn test_create_accepts_initial_observation() {
        let engine = Engine::strings();
        let record = engine
            .create(
                AttributeValue::string("foo"),
                Some(AttributeValue::string("foo")),
            )
            .unwrap();
        assert!(record.has_observation());
    }

    #[test]
    fn test_create_rejects_wrong_kind() {
        let engine = Engine::strings();
        let err = engine
            .create(AttributeValue::map([("foo", "bar")]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaViolation {
                expected: ValueKind::String,
                found: ValueKind::Map,
            }
        ));

        // A mismatched observation is rejected before any identity is minted.
        let err = engine
            .create(
                AttributeValue::string("foo"),
                Some(AttributeValue::map([("foo", "bar")])),
            )
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { .. }));
    }

    #[test]
    fn test_read_is_idempotent() {
        let engine = Engine::maps();
        let created = engine
            .create(AttributeValue::map([("foo", "bar")]), None)
            .unwrap();

        let once = engine.read(&created).unwrap();
        let twice = engine.read(&once).unwrap();
        assert_eq!(once, created);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_read_repairs_stale_fingerprint() {
        let engine = Engine::maps();
        let mut record = engine
            .create(AttributeValue::map([("foo", "bar")]), None)
            .unwrap();
        record.fingerprint = "stale".to_string();

        let refreshed = engine.read(&record).unwrap();
        assert_eq!(refreshed.fingerprint, FOO_BAR_DIGEST);
        assert_eq!(refreshed.desired, record.desired);
    }

    #[test]
    fn test_update_replaces_desired_and_keeps_identity() {
        let engine = Engine::maps();
        let created = engine
            .create(
                AttributeValue::map([("foo", "bar")]),
                Some(AttributeValue::map([("foo", "bar")])),
            )
            .unwrap();

        let updated = engine
            .update(&created, AttributeValue::map([("foo", "baz")]))
            .unwrap();

        assert_eq!(updated.identity, created.identity);
        assert_eq!(updated.real, created.real);
        assert_eq!(updated.desired, AttributeValue::map([("foo", "baz")]));
        assert_ne!(updated.fingerprint, created.fingerprint);
    }

    #[test]
    fn test_update_with_unchanged_desired_keeps_fingerprint() {
        let engine = Engine::strings();
        let created = engine.create(AttributeValue::string("foo"), None).unwrap();
        let updated = engine
            .update(&created, AttributeValue::string("foo"))
            .unwrap();
        assert_eq!(updated.fingerprint, created.fingerprint);
    }

    #[test]
    fn test_operations_require_an_identity() {
        let engine = Engine::strings();
        let record = absent(AttributeValue::string("foo"));

        assert!(matches!(
            engine.read(&record).unwrap_err(),
            Error::IdentityMissing { operation: "read" }
        ));
        assert!(matches!(
            engine
                .update(&record, AttributeValue::string("bar"))
                .unwrap_err(),
            Error::IdentityMissing {
                operation: "update"
            }
        ));
        assert!(matches!(
            engine.delete(&record).unwrap_err(),
            Error::IdentityMissing {
                operation: "delete"
            }
        ));
    }

    #[test]
    fn test_delete_succeeds_on_present_instance() {
        let engine = Engine::strings();
        let record = engine.create(AttributeValue::string("foo"), None).unwrap();
        engine.delete(&record).unwrap();
    }

    #[test]
    fn test_reconcile_scenario() {
        // The lifecycle the host drives in practice: create without an
        // observation, converge, edit the desired value, lose the
        // observation again.
        use crate::context::{MemoryStore, RecordStore};

        let engine = Engine::strings();
        let mut store = MemoryStore::new();

        // Initial create: no observation, trigger pending.
        let record = engine.create(AttributeValue::string("foo"), None).unwrap();
        store.store(&record).unwrap();
        let decision = engine.plan(&AttributeValue::string("foo"), &record).unwrap();
        assert_eq!(decision.real, FieldAction::Recompute);

        // Host observes the real object matching: converged, no refire.
        let mut record = store.load(&record.identity).unwrap().unwrap();
        record.real = Some(AttributeValue::string("foo"));
        store.store(&record).unwrap();
        let decision = engine.plan(&AttributeValue::string("foo"), &record).unwrap();
        assert!(decision.is_noop());

        // Desired value edited: fingerprint trigger fires, identity stable.
        let decision = engine.plan(&AttributeValue::string("bar"), &record).unwrap();
        assert!(decision.triggers_reapply());
        let updated = engine.update(&record, AttributeValue::string("bar")).unwrap();
        assert_eq!(updated.identity, record.identity);
        store.store(&updated).unwrap();

        // Observation dropped again: real goes back to known-after-apply,
        // but an unchanged desired value does not refire the trigger.
        let mut rogue = updated.clone();
        rogue.real = None;
        let decision = engine.plan(&AttributeValue::string("bar"), &rogue).unwrap();
        assert_eq!(decision.real, FieldAction::Recompute);
        assert_eq!(decision.fingerprint, DigestAction::Keep);

        engine.delete(&rogue).unwrap();
        store.remove(&rogue.identity).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_plan_validates_kind_and_delegates() {
        let engine = Engine::with_generator(ValueKind::Map, FixedIdentity("fixed"));
        let record = engine
            .create(
                AttributeValue::map([("foo", "bar")]),
                Some(AttributeValue::map([("foo", "wrong")])),
            )
            .unwrap();
        assert_eq!(record.identity, "fixed");

        let decision = engine
            .plan(&AttributeValue::map([("foo", "bar")]), &record)
            .unwrap();
        assert_eq!(decision.real, FieldAction::Recompute);
        assert_eq!(decision.fingerprint, DigestAction::Recompute);

        let err = engine
            .plan(&AttributeValue::string("foo"), &record)
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { .. }));
    }
}
