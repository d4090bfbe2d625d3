// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Adoption process records and per-entity eligibility rules.
//!
//! An `AdoptionRecord` is one attempt to place a specific dog with a
//! specific adoptee. Records are never physically deleted: closed
//! processes remain on file with `is_active = false` as the audit trail
//! of the dog's adoption history.

use crate::dog::Dog;
use crate::error::{DomainError, IneligibilityReason};
use crate::status::{AdoptionResult, AdoptionStatus};
use crate::types::Adoptee;
use time::OffsetDateTime;

/// One adoption attempt for a (dog, adoptee) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionRecord {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the record has not been persisted yet.
    pub adoption_record_id: Option<i64>,
    /// The dog under evaluation.
    pub dog_id: i64,
    /// The prospective adopter.
    pub adoptee_id: i64,
    /// The charter scope, derived from the dog at creation and fixed.
    pub charter_id: i64,
    /// The process outcome.
    pub result: AdoptionResult,
    /// True while the process is under evaluation.
    pub is_active: bool,
    /// When the evaluation began.
    pub start_date: Option<OffsetDateTime>,
    /// When the process closed.
    pub end_date: Option<OffsetDateTime>,
    /// Free-text caretaker notes.
    pub notes: String,
}

impl AdoptionRecord {
    /// Creates a new open evaluation record.
    ///
    /// The charter scope is taken from the dog and never changes,
    /// even if the dog later moves.
    #[must_use]
    pub const fn open(dog_id: i64, adoptee_id: i64, charter_id: i64, notes: String) -> Self {
        Self {
            adoption_record_id: None,
            dog_id,
            adoptee_id,
            charter_id,
            result: AdoptionResult::Evaluation,
            is_active: true,
            start_date: None,
            end_date: None,
            notes,
        }
    }

    /// Validates the record's internal consistency against the dog and
    /// adoptee it references.
    ///
    /// This is the post-transition sanity check: the lifecycle engine can
    /// never legally produce a record that fails it, so a violation is an
    /// engine bug surfaced as `DomainError::InconsistentState`, not a
    /// recoverable user error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentState` if:
    /// - The record is active with a non-evaluation result
    /// - The record is active while dog and adoptee are not both in trial
    /// - The record is closed with an evaluation result
    /// - The record is closed without an end date
    pub fn validate(&self, dog: &Dog, adoptee: &Adoptee) -> Result<(), DomainError> {
        if self.is_active {
            if self.result != AdoptionResult::Evaluation {
                return Err(DomainError::InconsistentState(format!(
                    "active process has result '{}', expected 'evaluation'",
                    self.result.as_str()
                )));
            }
            if dog.adoption_status != AdoptionStatus::Trial
                || adoptee.adoption_status != AdoptionStatus::Trial
            {
                return Err(DomainError::InconsistentState(format!(
                    "active evaluation with mismatched statuses: dog '{}', adoptee '{}'",
                    dog.adoption_status.as_str(),
                    adoptee.adoption_status.as_str()
                )));
            }
        } else {
            if !self.result.is_closed() {
                return Err(DomainError::InconsistentState(format!(
                    "inactive process has result '{}', expected 'approved' or 'rejected'",
                    self.result.as_str()
                )));
            }
            if self.end_date.is_none() {
                return Err(DomainError::InconsistentState(String::from(
                    "closed process has no end date",
                )));
            }
        }
        Ok(())
    }
}

/// Checks that a dog may enter a new adoption process.
///
/// # Errors
///
/// Returns `DomainError::AdoptionIneligible` naming the failed
/// precondition: the dog's health status (passed away or unspecified) or
/// the dog's adoption status (unfit, unspecified or adopted).
pub fn check_dog_eligibility(dog: &Dog) -> Result<(), DomainError> {
    if !dog.health_status.allows_new_process() {
        return Err(DomainError::AdoptionIneligible(
            IneligibilityReason::DogHealth(dog.health_status),
        ));
    }
    if dog.adoption_status.blocks_new_process() {
        return Err(DomainError::AdoptionIneligible(
            IneligibilityReason::DogStatus(dog.adoption_status),
        ));
    }
    Ok(())
}

/// Checks that an adoptee may enter a new adoption process.
///
/// # Errors
///
/// Returns `DomainError::AdoptionIneligible` with the adoptee's status if
/// it is unfit, unspecified or adopted.
pub fn check_adoptee_eligibility(adoptee: &Adoptee) -> Result<(), DomainError> {
    if adoptee.adoption_status.blocks_new_process() {
        return Err(DomainError::AdoptionIneligible(
            IneligibilityReason::AdopteeStatus(adoptee.adoption_status),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dog::DogIntake;
    use crate::status::{
        DogBreed, DogColor, DogGender, HealthStatus, IntakeReason, TripleChoice,
        VaccinationStatus,
    };
    use crate::types::{Contact, EntityInfo};
    use time::macros::datetime;

    fn test_dog(health: HealthStatus, adoption: AdoptionStatus) -> Dog {
        Dog::register(
            1,
            DogIntake {
                name: String::from("Rex"),
                age_months: 24,
                gender: DogGender::Male,
                breed: DogBreed::StreetDog,
                color: DogColor::Brown,
                intake_reason: IntakeReason::Rescue,
                arrival_date: datetime!(2026-01-10 09:00 UTC),
                microchip_status: TripleChoice::No,
                microchip_id: None,
                initial_weight_kg: Some(18.5),
                height_cm: 50.0,
                detailed_description: String::new(),
                health_status: health,
                vaccination_status: VaccinationStatus::Complete,
                castration_status: TripleChoice::Yes,
                adoption_status: adoption,
                owner_id: None,
                special_needs: String::new(),
                behavioral_notes: String::new(),
                other_notes: String::new(),
            },
        )
    }

    fn test_adoptee(status: AdoptionStatus) -> Adoptee {
        let entity: EntityInfo = EntityInfo::new(
            "jane doe",
            Some(String::from("jane@example.com")),
            None,
            None,
        );
        let mut adoptee: Adoptee = Adoptee::new(Contact::new(entity, String::new()), 1);
        adoptee.adoption_status = status;
        adoptee
    }

    #[test]
    fn test_fit_dog_is_eligible() {
        let dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Fit);
        assert!(check_dog_eligibility(&dog).is_ok());
    }

    #[test]
    fn test_sick_dog_is_still_eligible() {
        let dog = test_dog(HealthStatus::Sick, AdoptionStatus::Fit);
        assert!(check_dog_eligibility(&dog).is_ok());
    }

    #[test]
    fn test_passed_away_dog_is_not_eligible() {
        let dog = test_dog(HealthStatus::PassedAway, AdoptionStatus::Fit);
        let err = check_dog_eligibility(&dog).unwrap_err();
        assert_eq!(
            err,
            DomainError::AdoptionIneligible(IneligibilityReason::DogHealth(
                HealthStatus::PassedAway
            ))
        );
    }

    #[test]
    fn test_health_unspecified_dog_is_not_eligible() {
        let dog = test_dog(HealthStatus::Unspecified, AdoptionStatus::Fit);
        assert!(matches!(
            check_dog_eligibility(&dog).unwrap_err(),
            DomainError::AdoptionIneligible(IneligibilityReason::DogHealth(_))
        ));
    }

    #[test]
    fn test_unfit_dog_is_not_eligible() {
        let dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Unfit);
        assert!(matches!(
            check_dog_eligibility(&dog).unwrap_err(),
            DomainError::AdoptionIneligible(IneligibilityReason::DogStatus(
                AdoptionStatus::Unfit
            ))
        ));
    }

    #[test]
    fn test_adopted_dog_is_not_eligible() {
        let dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Adopted);
        assert!(matches!(
            check_dog_eligibility(&dog).unwrap_err(),
            DomainError::AdoptionIneligible(IneligibilityReason::DogStatus(
                AdoptionStatus::Adopted
            ))
        ));
    }

    #[test]
    fn test_fit_adoptee_is_eligible() {
        let adoptee = test_adoptee(AdoptionStatus::Fit);
        assert!(check_adoptee_eligibility(&adoptee).is_ok());
    }

    #[test]
    fn test_unfit_adoptee_is_not_eligible() {
        let adoptee = test_adoptee(AdoptionStatus::Unfit);
        assert!(matches!(
            check_adoptee_eligibility(&adoptee).unwrap_err(),
            DomainError::AdoptionIneligible(IneligibilityReason::AdopteeStatus(
                AdoptionStatus::Unfit
            ))
        ));
    }

    #[test]
    fn test_active_record_requires_trial_on_both_sides() {
        let mut dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Trial);
        dog.dog_id = Some(7);
        let adoptee = test_adoptee(AdoptionStatus::Fit);

        let record = AdoptionRecord::open(7, 3, 1, String::new());
        let err = record.validate(&dog, &adoptee).unwrap_err();
        assert!(matches!(err, DomainError::InconsistentState(_)));
    }

    #[test]
    fn test_active_record_with_trial_pair_is_valid() {
        let mut dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Trial);
        dog.dog_id = Some(7);
        let adoptee = test_adoptee(AdoptionStatus::Trial);

        let record = AdoptionRecord::open(7, 3, 1, String::new());
        assert!(record.validate(&dog, &adoptee).is_ok());
    }

    #[test]
    fn test_closed_record_requires_end_date() {
        let dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Fit);
        let adoptee = test_adoptee(AdoptionStatus::Fit);

        let mut record = AdoptionRecord::open(7, 3, 1, String::new());
        record.is_active = false;
        record.result = AdoptionResult::Rejected;
        record.end_date = None;

        assert!(matches!(
            record.validate(&dog, &adoptee).unwrap_err(),
            DomainError::InconsistentState(_)
        ));
    }

    #[test]
    fn test_closed_record_cannot_stay_in_evaluation() {
        let dog = test_dog(HealthStatus::Healthy, AdoptionStatus::Fit);
        let adoptee = test_adoptee(AdoptionStatus::Fit);

        let mut record = AdoptionRecord::open(7, 3, 1, String::new());
        record.is_active = false;
        record.end_date = Some(datetime!(2026-02-01 12:00 UTC));

        assert!(matches!(
            record.validate(&dog, &adoptee).unwrap_err(),
            DomainError::InconsistentState(_)
        ));
    }
}
