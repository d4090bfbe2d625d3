// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pawhaven_audit::{AuditEvent, StateSnapshot};
use pawhaven_domain::{AdoptionRecord, AdoptionStatus, Adoptee, Dog};

/// Uniqueness facts about a dog's adoption history, read inside the
/// bounding transaction.
///
/// The engine never queries the database itself; the persistence layer
/// reads these facts in the same transaction that will commit the
/// transition, closing the check-then-act window between the precondition
/// check and the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdoptionFacts {
    /// Whether any record for the dog has `is_active = true`.
    pub has_active_record: bool,
    /// Whether any record for the dog has `result = Approved`.
    pub has_approved_record: bool,
}

/// Statuses applied to the parties of a force-closed process.
///
/// Explicit named parameters; the conventional closure leaves the dog
/// unfit and returns the adoptee to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceCloseStatuses {
    /// The status the dog is left with.
    pub dog_status: AdoptionStatus,
    /// The status each affected adoptee is left with.
    pub adoptee_status: AdoptionStatus,
}

impl Default for ForceCloseStatuses {
    fn default() -> Self {
        Self {
            dog_status: AdoptionStatus::Unfit,
            adoptee_status: AdoptionStatus::Fit,
        }
    }
}

/// One adoption process closed administratively, with the adoptee it
/// released back to the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedProcess {
    /// The closed record.
    pub record: AdoptionRecord,
    /// The affected adoptee, returned to its post-closure status.
    pub adoptee: Adoptee,
}

/// The result of a successful adoption transition.
///
/// Transitions stage all three entity states; the persistence layer
/// commits them together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptionTransition {
    /// The new or updated adoption record.
    pub record: AdoptionRecord,
    /// The dog after the transition.
    pub dog: Dog,
    /// The adoptee after the transition.
    pub adoptee: Adoptee,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a health update, including any force-closed processes.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthTransition {
    /// The dog after the update.
    pub dog: Dog,
    /// Processes force-closed by a transition to `PassedAway`.
    /// Empty for every other health transition.
    pub closed: Vec<ClosedProcess>,
    /// The audit event recording this update.
    pub audit_event: AuditEvent,
}

/// Renders the adoption-relevant state of a (dog, adoptee, record)
/// triple for the audit trail.
#[must_use]
pub fn adoption_snapshot(
    dog: &Dog,
    adoptee: &Adoptee,
    record: Option<&AdoptionRecord>,
) -> StateSnapshot {
    let record_part: String = record.map_or_else(
        || String::from("none"),
        |r| format!("{}:{}", r.result.as_str(), if r.is_active { "active" } else { "closed" }),
    );
    StateSnapshot::new(format!(
        "dog_status={},adoptee_status={},record={record_part}",
        dog.adoption_status.as_str(),
        adoptee.adoption_status.as_str()
    ))
}

/// Renders a dog's health-relevant state for the audit trail.
#[must_use]
pub fn health_snapshot(dog: &Dog, active_processes: usize) -> StateSnapshot {
    StateSnapshot::new(format!(
        "health_status={},adoption_status={},active_processes={active_processes}",
        dog.health_status.as_str(),
        dog.adoption_status.as_str()
    ))
}
