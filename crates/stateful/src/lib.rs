//! # Stateful
//!
//! A framework for reconciled-state resources.
//!
//! This crate provides the core abstractions for a unit of configuration
//! that holds a desired value, an optional externally observed real value,
//! and a fingerprint derived from the desired value. A host orchestrator
//! drives the unit through create/read/update/delete and, ahead of every
//! change, asks for a plan diff that decides which fields must be shown as
//! changing.
//!
//! ## Core Concepts
//!
//! - **Record**: the full persisted state of one instance (identity,
//!   desired, real, fingerprint)
//! - **Engine**: the lifecycle state machine for one resource variant
//! - **PlanDecision**: the pre-flight diff decision the host applies
//! - **Fingerprint**: SHA-256 of the canonical desired value, the change
//!   trigger for dependent actions
//!
//! The engine is stateless between calls: the host supplies the full prior
//! record every time and persists the returned one, so drift detection fires
//! a dependent trigger exactly when the desired state changes or the real
//! object diverged from it, and never because an observation was merely
//! refreshed.
//!
//! ## Example
//!
//! ```
//! use stateful::{AttributeValue, DigestAction, Engine, FieldAction};
//!
//! let engine = Engine::maps();
//!
//! // Create: identity minted, fingerprint derived from the desired value.
//! let desired = AttributeValue::map([("foo", "bar")]);
//! let record = engine.create(desired.clone(), None)?;
//! assert_eq!(record.fingerprint.len(), 64);
//!
//! // No observation yet: the plan marks `real` as known-after-apply.
//! let decision = engine.plan(&desired, &record)?;
//! assert_eq!(decision.real, FieldAction::Recompute);
//!
//! // Observation matches the proposal: converged, nothing refires.
//! let mut observed = record.clone();
//! observed.real = Some(desired.clone());
//! let decision = engine.plan(&desired, &observed)?;
//! assert_eq!(decision.real, FieldAction::Clear);
//! assert_eq!(decision.fingerprint, DigestAction::Keep);
//!
//! // Desired edit: the fingerprint trigger fires.
//! let decision = engine.plan(&AttributeValue::map([("foo", "baz")]), &observed)?;
//! assert_eq!(decision.fingerprint, DigestAction::Recompute);
//! # Ok::<(), stateful::Error>(())
//! ```
//!
//! ## Provider Traits
//!
//! The crate uses traits for dependency injection:
//!
//! - [`IdentityGenerator`]: mints instance identities (default: UUID v4)
//! - [`RecordStore`]: the host-side persistence contract
//!
//! This allows the crate to be used without hard dependencies on specific
//! identity sources or storage backends.

pub mod context;
pub mod diff;
pub mod engine;
pub mod error;
pub mod record;

// Re-export main types at crate root
pub use context::{IdentityGenerator, MemoryStore, RecordStore, UuidIdentity};
pub use diff::{plan_diff, DigestAction, FieldAction, PlanDecision};
pub use engine::Engine;
pub use error::{Error, Result};
pub use record::Record;

// Value types from the fingerprint crate; every lifecycle call traffics in them.
pub use fingerprint::{canonical_json, fingerprint, AttributeValue, ValueKind};
