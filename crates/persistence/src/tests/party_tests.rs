// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the entity directory and party registry: identity
//! uniqueness, normalization, timestamps and protected deletes.

use super::{seed_adoptee, seed_charter, seed_dog, setup, test_now};
use crate::PersistenceError;
use pawhaven_domain::{AdoptionStatus, DomainError, EntityInfo, IdentityField};

#[test]
fn test_charter_name_is_title_cased() {
    let mut persistence = setup();
    let charter = persistence
        .register_charter(
            "happy paws shelter",
            Some(String::from("info@happypaws.org")),
            None,
            None,
            None,
        )
        .unwrap();

    assert_eq!(charter.entity_info.name, "Happy Paws Shelter");
}

#[test]
fn test_duplicate_name_is_rejected_case_insensitively() {
    let mut persistence = setup();
    seed_charter(&mut persistence, "North Shelter");

    let err = persistence
        .register_charter(
            "north shelter",
            Some(String::from("other@example.org")),
            None,
            None,
            None,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::DuplicateIdentity {
            field: IdentityField::Name,
            ..
        })
    ));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut persistence = setup();
    persistence
        .register_charter(
            "North Shelter",
            Some(String::from("shared@example.org")),
            None,
            None,
            None,
        )
        .unwrap();

    let err = persistence
        .register_contact(
            "Someone Else",
            Some(String::from("shared@example.org")),
            None,
            None,
            "",
            test_now(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::DuplicateIdentity {
            field: IdentityField::Email,
            ..
        })
    ));
}

#[test]
fn test_duplicate_phone_is_rejected() {
    let mut persistence = setup();
    persistence
        .register_contact(
            "First Person",
            None,
            Some(String::from("+1-555-0101")),
            None,
            "",
            test_now(),
        )
        .unwrap();

    let err = persistence
        .register_contact(
            "Second Person",
            None,
            Some(String::from("+1-555-0101")),
            None,
            "",
            test_now(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::DuplicateIdentity {
            field: IdentityField::Phone,
            ..
        })
    ));
}

#[test]
fn test_registration_requires_email_or_phone() {
    let mut persistence = setup();

    let err = persistence
        .register_contact("No Contact Method", None, None, None, "", test_now())
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::MissingContactMethod)
    ));
}

#[test]
fn test_failed_registration_leaves_no_entity_behind() {
    let mut persistence = setup();
    seed_charter(&mut persistence, "North Shelter");

    // Duplicate name: the transaction must roll back the entity insert.
    let result = persistence.register_contact(
        "North Shelter",
        Some(String::from("unique@example.com")),
        None,
        None,
        "",
        test_now(),
    );
    assert!(result.is_err());

    // The unique email must still be available.
    let contact = persistence
        .register_contact(
            "Different Name",
            Some(String::from("unique@example.com")),
            None,
            None,
            "",
            test_now(),
        )
        .unwrap();
    assert_eq!(contact.entity_info.email.as_deref(), Some("unique@example.com"));
}

#[test]
fn test_contact_timestamps_are_stamped_on_first_save() {
    let mut persistence = setup();
    let contact = persistence
        .register_contact(
            "Jane Doe",
            Some(String::from("jane@example.com")),
            None,
            None,
            "called about adopting",
            test_now(),
        )
        .unwrap();

    assert_eq!(contact.created, Some(test_now()));
    assert_eq!(contact.modified, Some(test_now()));
    assert_eq!(contact.notes, "called about adopting");
}

#[test]
fn test_new_adoptee_starts_fit() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let adoptee = seed_adoptee(&mut persistence, charter.charter_id().unwrap(), "Jane Doe");

    assert_eq!(adoptee.adoption_status, AdoptionStatus::Fit);
    assert_eq!(adoptee.charter_id, charter.charter_id().unwrap());
}

#[test]
fn test_adoptee_requires_existing_charter() {
    let mut persistence = setup();

    let err = persistence
        .register_adoptee(
            "Jane Doe",
            Some(String::from("jane@example.com")),
            None,
            None,
            "",
            999,
            test_now(),
        )
        .unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_entity_correction_keeps_casing_and_revalidates() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    seed_charter(&mut persistence, "South Shelter");

    // Correcting the charter's own record with unchanged values is fine.
    let unchanged: EntityInfo = charter.entity_info.clone();
    assert!(persistence.update_entity(&unchanged).is_ok());

    // Casing is preserved verbatim on edits.
    let recased: EntityInfo = EntityInfo::with_id(
        charter.entity_info.entity_info_id().unwrap(),
        String::from("NORTH shelter"),
        charter.entity_info.email.clone(),
        None,
        None,
    );
    persistence.update_entity(&recased).unwrap();
    let reloaded = persistence
        .get_charter(charter.charter_id().unwrap())
        .unwrap();
    assert_eq!(reloaded.entity_info.name, "NORTH shelter");

    // Taking another entity's name is still rejected.
    let stolen: EntityInfo = EntityInfo::with_id(
        charter.entity_info.entity_info_id().unwrap(),
        String::from("south shelter"),
        charter.entity_info.email.clone(),
        None,
        None,
    );
    assert!(matches!(
        persistence.update_entity(&stolen).unwrap_err(),
        PersistenceError::DomainViolation(DomainError::DuplicateIdentity { .. })
    ));
}

#[test]
fn test_charter_delete_is_blocked_by_dogs() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    seed_dog(&mut persistence, charter_id, "Rex");

    let err = persistence.delete_charter(charter_id).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::ReferentialIntegrity { .. })
    ));

    // Still present.
    assert!(persistence.get_charter(charter_id).is_ok());
}

#[test]
fn test_charter_delete_is_blocked_by_adoptees() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();
    seed_adoptee(&mut persistence, charter_id, "Jane Doe");

    assert!(matches!(
        persistence.delete_charter(charter_id).unwrap_err(),
        PersistenceError::DomainViolation(DomainError::ReferentialIntegrity { .. })
    ));
}

#[test]
fn test_unreferenced_charter_can_be_deleted() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let charter_id = charter.charter_id().unwrap();

    persistence.delete_charter(charter_id).unwrap();
    assert!(matches!(
        persistence.get_charter(charter_id).unwrap_err(),
        PersistenceError::NotFound(_)
    ));

    // The identity is released with it.
    let again = persistence.register_charter(
        "North Shelter",
        Some(String::from("north.shelter@example.org")),
        None,
        None,
        None,
    );
    assert!(again.is_ok());
}

#[test]
fn test_contact_registered_as_adoptee_cannot_be_deleted() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let adoptee = seed_adoptee(&mut persistence, charter.charter_id().unwrap(), "Jane Doe");

    let err = persistence
        .delete_contact(adoptee.contact.contact_id().unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::DomainViolation(DomainError::ReferentialIntegrity { .. })
    ));
}

#[test]
fn test_adoptee_without_references_deletes_with_contact_and_identity() {
    let mut persistence = setup();
    let charter = seed_charter(&mut persistence, "North Shelter");
    let adoptee = seed_adoptee(&mut persistence, charter.charter_id().unwrap(), "Jane Doe");
    let adoptee_id = adoptee.adoptee_id().unwrap();

    persistence.delete_adoptee(adoptee_id).unwrap();
    assert!(matches!(
        persistence.get_adoptee(adoptee_id).unwrap_err(),
        PersistenceError::NotFound(_)
    ));

    // Name and email are released.
    let again = seed_adoptee(&mut persistence, charter.charter_id().unwrap(), "Jane Doe");
    assert_eq!(again.contact.entity_info.name, "Jane Doe");
}
