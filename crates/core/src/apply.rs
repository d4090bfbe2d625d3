// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The adoption lifecycle transitions.
//!
//! Every function here is pure: it takes the current entity states plus
//! the in-transaction uniqueness facts, and stages the new states without
//! touching any storage. The persistence layer commits a staged
//! transition atomically or not at all, so a returned error means nothing
//! changed.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    AdoptionFacts, AdoptionTransition, ClosedProcess, ForceCloseStatuses, HealthTransition,
    adoption_snapshot, health_snapshot,
};
use pawhaven_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use pawhaven_domain::{
    AdoptionRecord, AdoptionResult, AdoptionStatus, Adoptee, Dog, DomainError, HealthStatus,
    IneligibilityReason, check_adoptee_eligibility, check_dog_eligibility,
};
use time::OffsetDateTime;

/// Extracts a persisted id, surfacing an engine-level inconsistency when
/// an unpersisted entity reaches the engine.
fn persisted_id(id: Option<i64>, entity: &str) -> Result<i64, CoreError> {
    id.ok_or_else(|| {
        CoreError::DomainViolation(DomainError::InconsistentState(format!(
            "{entity} has no persisted id"
        )))
    })
}

/// Applies an adoption command to a (dog, adoptee) pair, producing the
/// staged transition and audit event.
///
/// `record` is the active record being resolved for approve/reject
/// commands and `None` when opening a new evaluation. `facts` carries the
/// per-dog uniqueness facts read inside the bounding transaction.
///
/// # Arguments
///
/// * `dog` - The dog's current state (immutable)
/// * `adoptee` - The adoptee's current state (immutable)
/// * `record` - The record being resolved, if any
/// * `facts` - In-transaction uniqueness facts for the dog
/// * `command` - The adoption command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition time
///
/// # Returns
///
/// * `Ok(AdoptionTransition)` staging the new record, dog and adoptee
/// * `Err(CoreError)` if a precondition fails
///
/// # Errors
///
/// Returns an error if:
/// - The dog already has an active or approved process (open)
/// - The dog or adoptee is not eligible for adoption (open)
/// - The record is already closed (approve/reject)
/// - The post-transition sanity check fails (engine bug)
#[allow(clippy::too_many_lines, clippy::too_many_arguments)]
pub fn apply_adoption(
    dog: &Dog,
    adoptee: &Adoptee,
    record: Option<&AdoptionRecord>,
    facts: &AdoptionFacts,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdoptionTransition, CoreError> {
    let dog_id: i64 = persisted_id(dog.dog_id, "dog")?;
    let adoptee_id: i64 = persisted_id(adoptee.adoptee_id(), "adoptee")?;

    match command {
        Command::OpenAdoption { notes } => {
            // At most one concurrent process and at most one approval per
            // dog. These facts were read inside the same transaction that
            // commits this transition.
            if facts.has_active_record {
                return Err(CoreError::DomainViolation(DomainError::AdoptionIneligible(
                    IneligibilityReason::DuplicateActive,
                )));
            }
            if facts.has_approved_record {
                return Err(CoreError::DomainViolation(DomainError::AdoptionIneligible(
                    IneligibilityReason::DuplicateApproved,
                )));
            }

            check_dog_eligibility(dog)?;
            check_adoptee_eligibility(adoptee)?;

            let before: StateSnapshot = adoption_snapshot(dog, adoptee, None);

            let mut new_record: AdoptionRecord =
                AdoptionRecord::open(dog_id, adoptee_id, dog.charter_id, notes);
            new_record.start_date = Some(now);

            let mut new_dog: Dog = dog.clone();
            new_dog.adoption_status = AdoptionStatus::Trial;

            let mut new_adoptee: Adoptee = adoptee.clone();
            new_adoptee.adoption_status = AdoptionStatus::Trial;

            // Re-derivable sanity check: an active evaluation must leave
            // both parties in trial.
            new_record.validate(&new_dog, &new_adoptee)?;
            new_adoptee.validate()?;

            let after: StateSnapshot = adoption_snapshot(&new_dog, &new_adoptee, Some(&new_record));

            let action: Action = Action::new(
                String::from("OpenAdoption"),
                Some(format!(
                    "Opened adoption evaluation for dog {dog_id} with adoptee {adoptee_id}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                Some(dog.charter_id),
                Some(dog_id),
            );

            Ok(AdoptionTransition {
                record: new_record,
                dog: new_dog,
                adoptee: new_adoptee,
                audit_event,
            })
        }
        Command::ApproveAdoption { notes } => resolve(
            dog,
            adoptee,
            record,
            AdoptionResult::Approved,
            notes,
            actor,
            cause,
            now,
        ),
        Command::RejectAdoption { notes } => resolve(
            dog,
            adoptee,
            record,
            AdoptionResult::Rejected,
            notes,
            actor,
            cause,
            now,
        ),
        Command::UpdateHealth { .. } => {
            // Health commands go through apply_health_update() instead
            unreachable!("apply_adoption called with health command")
        }
    }
}

/// Closes the active record with the given result and stages the
/// matching dog/adoptee statuses.
#[allow(clippy::too_many_arguments)]
fn resolve(
    dog: &Dog,
    adoptee: &Adoptee,
    record: Option<&AdoptionRecord>,
    result: AdoptionResult,
    notes: Option<String>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdoptionTransition, CoreError> {
    let dog_id: i64 = persisted_id(dog.dog_id, "dog")?;
    let adoptee_id: i64 = persisted_id(adoptee.adoptee_id(), "adoptee")?;

    let record: &AdoptionRecord = record.ok_or_else(|| {
        CoreError::DomainViolation(DomainError::InconsistentState(String::from(
            "resolve without a record to resolve",
        )))
    })?;

    if record.dog_id != dog_id || record.adoptee_id != adoptee_id {
        return Err(CoreError::DomainViolation(DomainError::InconsistentState(
            format!(
                "record references dog {} / adoptee {}, got dog {dog_id} / adoptee {adoptee_id}",
                record.dog_id, record.adoptee_id
            ),
        )));
    }

    if !record.is_active {
        return Err(CoreError::DomainViolation(DomainError::ProcessNotActive {
            result: record.result,
        }));
    }

    let before: StateSnapshot = adoption_snapshot(dog, adoptee, Some(record));

    let mut new_record: AdoptionRecord = record.clone();
    new_record.is_active = false;
    new_record.result = result;
    new_record.end_date = Some(now);
    if let Some(notes) = notes {
        new_record.notes = notes;
    }

    let mut new_dog: Dog = dog.clone();
    let mut new_adoptee: Adoptee = adoptee.clone();

    match result {
        AdoptionResult::Approved => {
            new_dog.adoption_status = AdoptionStatus::Adopted;
            new_dog.owner_id = Some(adoptee_id);
            // The adoptee returns to the pool; the adopted semantic lives
            // on the dog.
            new_adoptee.adoption_status = AdoptionStatus::Fit;
        }
        AdoptionResult::Rejected => {
            new_dog.adoption_status = AdoptionStatus::Fit;
            new_adoptee.adoption_status = AdoptionStatus::Fit;
        }
        AdoptionResult::Evaluation => {
            return Err(CoreError::DomainViolation(DomainError::InconsistentState(
                String::from("resolve cannot keep a process in evaluation"),
            )));
        }
    }

    new_record.validate(&new_dog, &new_adoptee)?;
    new_dog.validate()?;
    new_adoptee.validate()?;

    let after: StateSnapshot = adoption_snapshot(&new_dog, &new_adoptee, Some(&new_record));

    let action_name: &str = match result {
        AdoptionResult::Approved => "ApproveAdoption",
        _ => "RejectAdoption",
    };
    let action: Action = Action::new(
        String::from(action_name),
        Some(format!(
            "Closed adoption process for dog {dog_id} with adoptee {adoptee_id} as '{}'",
            result.as_str()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(dog.charter_id),
        Some(dog_id),
    );

    Ok(AdoptionTransition {
        record: new_record,
        dog: new_dog,
        adoptee: new_adoptee,
        audit_event,
    })
}

/// Applies a health update to a dog, force-closing active adoption
/// processes when the dog passes away.
///
/// `active_processes` is every record on the dog with `is_active = true`,
/// paired with its adoptee, read inside the bounding transaction. A
/// transition to `PassedAway` closes each of them with `Rejected` and the
/// explicit `statuses` parameters; with zero active processes the
/// closure is a no-op, making the operation idempotent. Any other health
/// transition leaves adoption state untouched.
///
/// # Arguments
///
/// * `dog` - The dog's current state (immutable)
/// * `active_processes` - Active records with their adoptees
/// * `command` - The `UpdateHealth` command to apply
/// * `statuses` - Statuses applied to the parties of force-closed processes
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition time
///
/// # Errors
///
/// Returns an error if:
/// - The transition is to `PassedAway` without passing details
/// - The staged dog state fails invariant validation
/// - A supposedly active process is not actually active (engine bug)
pub fn apply_health_update(
    dog: &Dog,
    active_processes: &[(AdoptionRecord, Adoptee)],
    command: Command,
    statuses: ForceCloseStatuses,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthTransition, CoreError> {
    let Command::UpdateHealth { status, passing } = command else {
        // Adoption commands go through apply_adoption() instead
        unreachable!("apply_health_update called with adoption command")
    };

    let dog_id: i64 = persisted_id(dog.dog_id, "dog")?;
    let before: StateSnapshot = health_snapshot(dog, active_processes.len());

    let mut new_dog: Dog = dog.clone();
    let mut closed: Vec<ClosedProcess> = Vec::new();

    if status == HealthStatus::PassedAway {
        let passing = passing.ok_or_else(|| {
            CoreError::DomainViolation(DomainError::MissingPassingInfo {
                field: "Passing date",
            })
        })?;
        new_dog.health_status = HealthStatus::PassedAway;
        new_dog.passing = Some(passing);

        // Administrative override: bypasses the open/resolve
        // preconditions and closes every active process.
        for (record, adoptee) in active_processes {
            if !record.is_active || record.dog_id != dog_id {
                return Err(CoreError::DomainViolation(DomainError::InconsistentState(
                    format!(
                        "force-close given a non-active or foreign record {:?}",
                        record.adoption_record_id
                    ),
                )));
            }

            let mut closed_record: AdoptionRecord = record.clone();
            closed_record.is_active = false;
            closed_record.result = AdoptionResult::Rejected;
            closed_record.end_date = Some(now);

            let mut released_adoptee: Adoptee = adoptee.clone();
            released_adoptee.adoption_status = statuses.adoptee_status;
            released_adoptee.validate()?;

            closed.push(ClosedProcess {
                record: closed_record,
                adoptee: released_adoptee,
            });
        }

        if !closed.is_empty() {
            new_dog.adoption_status = statuses.dog_status;
        }
    } else {
        new_dog.health_status = status;
    }

    new_dog.validate()?;

    let remaining: usize = if status == HealthStatus::PassedAway {
        0
    } else {
        active_processes.len()
    };
    let after: StateSnapshot = health_snapshot(&new_dog, remaining);

    let details: String = if closed.is_empty() {
        format!("Updated health status of dog {dog_id} to '{}'", status.as_str())
    } else {
        format!(
            "Updated health status of dog {dog_id} to '{}', force-closed {} adoption process(es)",
            status.as_str(),
            closed.len()
        )
    };
    let action: Action = Action::new(String::from("UpdateHealth"), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(dog.charter_id),
        Some(dog_id),
    );

    Ok(HealthTransition {
        dog: new_dog,
        closed,
        audit_event,
    })
}
