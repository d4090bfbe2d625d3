// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for health updates and the force-closure of active processes on
//! a dog's death.

use crate::{Command, CoreError, ForceCloseStatuses, apply_health_update};
use pawhaven_domain::{
    AdoptionResult, AdoptionStatus, DomainError, HealthStatus, PassingInfo,
};

use super::helpers::{
    create_open_record, create_test_actor, create_test_adoptee, create_test_cause,
    create_test_dog, test_now,
};

fn test_passing() -> PassingInfo {
    PassingInfo::new(
        test_now(),
        String::from("Sudden illness"),
        String::from("Shelter garden"),
    )
    .unwrap()
}

#[test]
fn test_simple_health_update_leaves_adoption_state_alone() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Fit);

    let transition = apply_health_update(
        &dog,
        &[],
        Command::UpdateHealth {
            status: HealthStatus::Sick,
            passing: None,
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(transition.dog.health_status, HealthStatus::Sick);
    assert_eq!(transition.dog.adoption_status, AdoptionStatus::Fit);
    assert!(transition.closed.is_empty());
}

#[test]
fn test_passing_requires_passing_info() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Fit);

    let err = apply_health_update(
        &dog,
        &[],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: None,
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::MissingPassingInfo { .. })
    ));
}

#[test]
fn test_passing_force_closes_active_process() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Trial);
    let adoptee = create_test_adoptee(3, AdoptionStatus::Trial);
    let record = create_open_record(11, 7, 3);

    let transition = apply_health_update(
        &dog,
        &[(record, adoptee)],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(transition.dog.health_status, HealthStatus::PassedAway);
    assert_eq!(transition.dog.adoption_status, AdoptionStatus::Unfit);
    assert!(transition.dog.passing.is_some());

    assert_eq!(transition.closed.len(), 1);
    let closed = &transition.closed[0];
    assert!(!closed.record.is_active);
    assert_eq!(closed.record.result, AdoptionResult::Rejected);
    assert_eq!(closed.record.end_date, Some(test_now()));
    assert_eq!(closed.adoptee.adoption_status, AdoptionStatus::Fit);

    assert!(
        transition
            .audit_event
            .action
            .details
            .as_deref()
            .unwrap_or_default()
            .contains("force-closed 1")
    );
}

#[test]
fn test_passing_with_no_active_processes_is_a_no_op_closure() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Fit);

    let transition = apply_health_update(
        &dog,
        &[],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    // Idempotent: nothing to close, adoption status untouched.
    assert!(transition.closed.is_empty());
    assert_eq!(transition.dog.adoption_status, AdoptionStatus::Fit);
    assert_eq!(transition.dog.health_status, HealthStatus::PassedAway);
}

#[test]
fn test_passing_twice_is_idempotent() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Trial);
    let adoptee = create_test_adoptee(3, AdoptionStatus::Trial);
    let record = create_open_record(11, 7, 3);

    let first = apply_health_update(
        &dog,
        &[(record, adoptee)],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    // Second update sees no active processes.
    let second = apply_health_update(
        &first.dog,
        &[],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert!(second.closed.is_empty());
    assert_eq!(second.dog.adoption_status, first.dog.adoption_status);
    assert_eq!(second.dog.health_status, HealthStatus::PassedAway);
}

#[test]
fn test_force_close_honors_explicit_statuses() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Trial);
    let adoptee = create_test_adoptee(3, AdoptionStatus::Trial);
    let record = create_open_record(11, 7, 3);

    let transition = apply_health_update(
        &dog,
        &[(record, adoptee)],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses {
            dog_status: AdoptionStatus::Unfit,
            adoptee_status: AdoptionStatus::Unfit,
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(transition.closed[0].adoptee.adoption_status, AdoptionStatus::Unfit);
}

#[test]
fn test_force_close_rejects_foreign_record() {
    let dog = create_test_dog(7, HealthStatus::Healthy, AdoptionStatus::Trial);
    let adoptee = create_test_adoptee(3, AdoptionStatus::Trial);
    // Active record for another dog handed to the wrong closure.
    let record = create_open_record(11, 8, 3);

    let err = apply_health_update(
        &dog,
        &[(record, adoptee)],
        Command::UpdateHealth {
            status: HealthStatus::PassedAway,
            passing: Some(test_passing()),
        },
        ForceCloseStatuses::default(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InconsistentState(_))
    ));
}
