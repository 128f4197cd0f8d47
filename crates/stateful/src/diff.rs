//! Plan-diff policy for reconciled state
//!
//! Decides, ahead of every lifecycle transition, which observable fields the
//! host must present as changing in the pending plan. The policy is a pure
//! function over the persisted record and the proposed inputs; the host
//! applies the returned decision, so there is no hidden plan mutation.

use crate::error::{Error, Result};
use fingerprint::AttributeValue;
use serde::{Deserialize, Serialize};

/// Planned handling of the observed (`real`) field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldAction {
    /// Leave the field at its persisted value
    Keep,
    /// Drop any pending change; the field is converged
    Clear,
    /// Present the field as known-after-apply
    Recompute,
}

/// Planned handling of the derived fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestAction {
    /// Fingerprint stays at its persisted value
    Keep,
    /// Fingerprint will be rederived; dependent triggers fire
    Recompute,
}

/// Decision produced by [`plan_diff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDecision {
    /// What the plan shows for the observed value
    pub real: FieldAction,
    /// What the plan shows for the fingerprint
    pub fingerprint: DigestAction,
}

impl PlanDecision {
    /// Whether applying this decision re-derives nothing
    pub fn is_noop(&self) -> bool {
        self.fingerprint == DigestAction::Keep && self.real != FieldAction::Recompute
    }

    /// Whether a dependent trigger keyed on the fingerprint will fire
    pub fn triggers_reapply(&self) -> bool {
        self.fingerprint == DigestAction::Recompute
    }
}

/// Decide which fields the pending plan must present as changing
///
/// Rules, in order:
/// 1. No observation on record: `real` is marked for recompute. With no two
///    comparable observations there is nothing to diff yet, and the host is
///    told so explicitly instead of the field silently keeping its prior
///    value.
/// 2. Observation on record: exact structural equality against the proposed
///    desired value clears any pending change on `real`; any difference is
///    drift and marks both `real` and the fingerprint for recompute.
/// 3. Independently, a change to the desired value itself always marks the
///    fingerprint for recompute, whatever the `real` comparison said.
///
/// Net effect: a trigger keyed on the fingerprint fires exactly when the
/// desired state changes or the real object drifted from it, and never
/// because `real` was merely refreshed while still matching.
///
/// Mixing value kinds anywhere in the comparison is a schema violation.
pub fn plan_diff(
    proposed: &AttributeValue,
    persisted_desired: &AttributeValue,
    persisted_real: Option<&AttributeValue>,
) -> Result<PlanDecision> {
    expect_same_kind(persisted_desired, proposed)?;

    let mut decision = PlanDecision {
        real: FieldAction::Keep,
        fingerprint: DigestAction::Keep,
    };

    match persisted_real {
        None => decision.real = FieldAction::Recompute,
        Some(real) => {
            expect_same_kind(proposed, real)?;
            if real == proposed {
                decision.real = FieldAction::Clear;
            } else {
                decision.real = FieldAction::Recompute;
                decision.fingerprint = DigestAction::Recompute;
            }
        }
    }

    if proposed != persisted_desired {
        decision.fingerprint = DigestAction::Recompute;
    }

    Ok(decision)
}

fn expect_same_kind(expected: &AttributeValue, found: &AttributeValue) -> Result<()> {
    if expected.kind() == found.kind() {
        Ok(())
    } else {
        Err(Error::SchemaViolation {
            expected: expected.kind(),
            found: found.kind(),
        })
    }
}
