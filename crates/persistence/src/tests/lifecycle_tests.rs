// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end tests for the adoption lifecycle: the three-way
//! transactional writes, the precondition ladder re-checked inside the
//! transaction, and force-closure on a dog's death.

use super::{
    create_test_actor, create_test_cause, later, seed_adoptee, seed_charter, seed_dog, setup,
    test_now, test_passing,
};
use crate::PersistenceError;
use pawhaven_domain::{
    AdoptionResult, AdoptionStatus, DomainError, HealthStatus, IneligibilityReason,
};

#[test]
fn test_open_transitions_dog_and_adoptee_to_trial() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");

    let record = persistence
        .open_adoption(
            dog.dog_id.unwrap(),
            adoptee.adoptee_id().unwrap(),
            "first visit scheduled",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    assert!(record.is_active);
    assert_eq!(record.result, AdoptionResult::Evaluation);
    assert_eq!(record.start_date, Some(test_now()));
    assert_eq!(record.charter_id, charter_id);

    let dog = persistence.get_dog(dog.dog_id.unwrap()).unwrap();
    let adoptee = persistence.get_adoptee(adoptee.adoptee_id().unwrap()).unwrap();
    assert_eq!(dog.adoption_status, AdoptionStatus::Trial);
    assert_eq!(adoptee.adoption_status, AdoptionStatus::Trial);
}

#[test]
fn test_approve_round_trip() {
    // Open then approve: FIT dog + FIT adoptee end as ADOPTED dog with
    // owner set + FIT adoptee, in one atomic step each.
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let record = persistence
        .open_adoption(
            dog_id,
            adoptee_id,
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let resolved = persistence
        .resolve_adoption(
            record.adoption_record_id.unwrap(),
            AdoptionResult::Approved,
            Some(String::from("approved after home visit")),
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    assert!(!resolved.is_active);
    assert_eq!(resolved.result, AdoptionResult::Approved);
    assert_eq!(resolved.end_date, Some(later()));
    assert_eq!(resolved.notes, "approved after home visit");

    let dog = persistence.get_dog(dog_id).unwrap();
    assert_eq!(dog.adoption_status, AdoptionStatus::Adopted);
    assert_eq!(dog.owner_id, Some(adoptee_id));

    let adoptee = persistence.get_adoptee(adoptee_id).unwrap();
    assert_eq!(adoptee.adoption_status, AdoptionStatus::Fit);

    // The adoptee's dogs view reflects the placement.
    let adopted = persistence.adopted_dogs(adoptee_id).unwrap();
    assert_eq!(adopted.len(), 1);
    assert_eq!(adopted[0].dog_id, Some(dog_id));
}

#[test]
fn test_reject_returns_both_parties_to_the_pool() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let record = persistence
        .open_adoption(
            dog_id,
            adoptee_id,
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();
    persistence
        .resolve_adoption(
            record.adoption_record_id.unwrap(),
            AdoptionResult::Rejected,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    let dog = persistence.get_dog(dog_id).unwrap();
    let adoptee = persistence.get_adoptee(adoptee_id).unwrap();
    assert_eq!(dog.adoption_status, AdoptionStatus::Fit);
    assert_eq!(dog.owner_id, None);
    assert_eq!(adoptee.adoption_status, AdoptionStatus::Fit);

    // The closed record stays on file as history.
    let records = persistence.adoption_records_for_dog(dog_id).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_active);
}

#[test]
fn test_second_concurrent_open_is_rejected_without_state_changes() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let first = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let second = seed_adoptee(&mut persistence, charter_id, "John Roe");
    let dog_id = dog.dog_id.unwrap();

    persistence
        .open_adoption(
            dog_id,
            first.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let err = persistence
        .open_adoption(
            dog_id,
            second.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::AdoptionIneligible(
            IneligibilityReason::DuplicateActive
        ))
    ));

    // No state changed for anyone involved.
    assert_eq!(
        persistence.get_dog(dog_id).unwrap().adoption_status,
        AdoptionStatus::Trial
    );
    assert_eq!(
        persistence
            .get_adoptee(first.adoptee_id().unwrap())
            .unwrap()
            .adoption_status,
        AdoptionStatus::Trial
    );
    assert_eq!(
        persistence
            .get_adoptee(second.adoptee_id().unwrap())
            .unwrap()
            .adoption_status,
        AdoptionStatus::Fit
    );
    assert_eq!(persistence.adoption_records_for_dog(dog_id).unwrap().len(), 1);
}

#[test]
fn test_dog_can_reenter_evaluation_after_rejection_but_not_after_approval() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let first = persistence
        .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), test_now())
        .unwrap();
    persistence
        .resolve_adoption(
            first.adoption_record_id.unwrap(),
            AdoptionResult::Rejected,
            None,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    // After a rejection the dog is back in the pool.
    let second = persistence
        .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), later())
        .unwrap();
    persistence
        .resolve_adoption(
            second.adoption_record_id.unwrap(),
            AdoptionResult::Approved,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    // After an approval the dog can never re-enter evaluation.
    let err = persistence
        .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), later())
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::AdoptionIneligible(
            IneligibilityReason::DuplicateApproved
        ))
    ));
}

#[test]
fn test_open_on_health_unspecified_dog_changes_nothing() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let mut sick_intake = super::base_intake("Ghost");
    sick_intake.health_status = HealthStatus::Unspecified;
    let unspecified_dog = persistence
        .register_dog(charter_id, sick_intake, test_now())
        .unwrap();

    let err = persistence
        .open_adoption(
            unspecified_dog.dog_id.unwrap(),
            adoptee_id,
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::AdoptionIneligible(
            IneligibilityReason::DogHealth(HealthStatus::Unspecified)
        ))
    ));

    // Nothing changed.
    assert_eq!(
        persistence.get_dog(dog_id).unwrap().adoption_status,
        AdoptionStatus::Fit
    );
    assert_eq!(
        persistence.get_adoptee(adoptee_id).unwrap().adoption_status,
        AdoptionStatus::Fit
    );
    assert!(
        persistence
            .adoption_records_for_dog(unspecified_dog.dog_id.unwrap())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_resolving_a_closed_record_fails() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");

    let record = persistence
        .open_adoption(
            dog.dog_id.unwrap(),
            adoptee.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();
    let record_id = record.adoption_record_id.unwrap();

    persistence
        .resolve_adoption(
            record_id,
            AdoptionResult::Rejected,
            None,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let err = persistence
        .resolve_adoption(
            record_id,
            AdoptionResult::Approved,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::ProcessNotActive {
            result: AdoptionResult::Rejected
        })
    ));
}

#[test]
fn test_death_mid_trial_force_closes_the_process() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let record = persistence
        .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), test_now())
        .unwrap();

    let dog = persistence
        .update_health(
            dog_id,
            HealthStatus::PassedAway,
            Some(test_passing()),
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    assert_eq!(dog.health_status, HealthStatus::PassedAway);
    assert_eq!(dog.adoption_status, AdoptionStatus::Unfit);
    assert!(dog.passing.is_some());

    let record = persistence
        .get_adoption_record(record.adoption_record_id.unwrap())
        .unwrap();
    assert!(!record.is_active);
    assert_eq!(record.result, AdoptionResult::Rejected);
    assert_eq!(record.end_date, Some(later()));

    let adoptee = persistence.get_adoptee(adoptee_id).unwrap();
    assert_eq!(adoptee.adoption_status, AdoptionStatus::Fit);
}

#[test]
fn test_death_with_no_active_processes_is_idempotent() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let dog_id = dog.dog_id.unwrap();

    let updated = persistence
        .update_health(
            dog_id,
            HealthStatus::PassedAway,
            Some(test_passing()),
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    // No processes to close: adoption status is untouched.
    assert_eq!(updated.adoption_status, AdoptionStatus::Fit);
    assert_eq!(updated.health_status, HealthStatus::PassedAway);

    // Applying the same update again is still a no-op closure.
    let again = persistence
        .update_health(
            dog_id,
            HealthStatus::PassedAway,
            Some(test_passing()),
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();
    assert_eq!(again.adoption_status, AdoptionStatus::Fit);
}

#[test]
fn test_death_without_passing_info_changes_nothing() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();

    persistence
        .open_adoption(
            dog_id,
            adoptee.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let err = persistence
        .update_health(
            dog_id,
            HealthStatus::PassedAway,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::MissingPassingInfo { .. })
    ));

    // The transaction rolled back: still healthy, still in trial.
    let dog = persistence.get_dog(dog_id).unwrap();
    assert_eq!(dog.health_status, HealthStatus::Healthy);
    assert_eq!(dog.adoption_status, AdoptionStatus::Trial);
    let records = persistence.adoption_records_for_dog(dog_id).unwrap();
    assert!(records[0].is_active);
}

#[test]
fn test_sick_dog_may_stay_in_trial() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();

    persistence
        .open_adoption(
            dog_id,
            adoptee.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let dog = persistence
        .update_health(
            dog_id,
            HealthStatus::Sick,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    assert_eq!(dog.health_status, HealthStatus::Sick);
    assert_eq!(dog.adoption_status, AdoptionStatus::Trial);
    let records = persistence.adoption_records_for_dog(dog_id).unwrap();
    assert!(records[0].is_active);
}

#[test]
fn test_at_most_one_active_and_one_approved_record_per_dog() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();
    let adoptee_id = adoptee.adoptee_id().unwrap();

    // Build up history: reject, reject, approve.
    for _ in 0..2 {
        let record = persistence
            .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), test_now())
            .unwrap();
        persistence
            .resolve_adoption(
                record.adoption_record_id.unwrap(),
                AdoptionResult::Rejected,
                None,
                create_test_actor(),
                create_test_cause(),
                test_now(),
            )
            .unwrap();
    }
    let record = persistence
        .open_adoption(dog_id, adoptee_id, "", create_test_actor(), create_test_cause(), test_now())
        .unwrap();
    persistence
        .resolve_adoption(
            record.adoption_record_id.unwrap(),
            AdoptionResult::Approved,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    let records = persistence.adoption_records_for_dog(dog_id).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().filter(|r| r.is_active).count(), 0);
    assert_eq!(
        records
            .iter()
            .filter(|r| r.result == AdoptionResult::Approved)
            .count(),
        1
    );
}

#[test]
fn test_transitions_append_to_the_audit_trail() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let dog_id = dog.dog_id.unwrap();

    let record = persistence
        .open_adoption(
            dog_id,
            adoptee.adoptee_id().unwrap(),
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();
    persistence
        .resolve_adoption(
            record.adoption_record_id.unwrap(),
            AdoptionResult::Approved,
            None,
            create_test_actor(),
            create_test_cause(),
            later(),
        )
        .unwrap();

    let trail = persistence.audit_trail_for_dog(dog_id).unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].1.action.name, "OpenAdoption");
    assert_eq!(trail[1].1.action.name, "ApproveAdoption");
    assert_eq!(trail[0].1.charter_id, Some(charter_id));
    assert_eq!(trail[0].1.dog_id, Some(dog_id));
    assert_eq!(trail[0].1.actor.id, "caretaker-7");

    let (event_id, _) = trail[0];
    let event = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(event.action.name, "OpenAdoption");
}

#[test]
fn test_adoptee_with_history_cannot_be_deleted() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    let dog = seed_dog(&mut persistence, charter_id, "Rex");
    let adoptee = seed_adoptee(&mut persistence, charter_id, "Jane Doe");
    let adoptee_id = adoptee.adoptee_id().unwrap();

    let record = persistence
        .open_adoption(
            dog.dog_id.unwrap(),
            adoptee_id,
            "",
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();
    persistence
        .resolve_adoption(
            record.adoption_record_id.unwrap(),
            AdoptionResult::Rejected,
            None,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

    let err = persistence.delete_adoptee(adoptee_id).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::ReferentialIntegrity { .. })
    ));
}
