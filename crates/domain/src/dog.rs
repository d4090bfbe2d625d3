// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dog aggregate: identity, health, attachments and weight history.

use crate::error::DomainError;
use crate::status::{
    AdoptionStatus, DogBreed, DogColor, DogGender, HealthStatus, IntakeReason, TripleChoice,
    VaccinationStatus,
};
use crate::validation::title_case;
use time::OffsetDateTime;

/// Placeholder photo served when a dog has no attachments and its charter
/// has no default photo.
pub const DEFAULT_DOG_PHOTO_PATH: &str = "/static/images/default-dog.png";

/// Template text seeded into a new dog's health record.
pub const HEALTH_RECORD_TEMPLATE: &str = "Any sickness, injuries, pregnancies, castration or other procedures should be entered here.";
/// Template text seeded into a new dog's vaccination record.
pub const VACCINATION_RECORD_TEMPLATE: &str = "The name of the vaccines alongside of the date they were administered should be entered here";
/// Template text seeded into a new dog's treatment record.
pub const TREATMENT_RECORD_TEMPLATE: &str = "Any medication or treatment, with names, dosages and frequency should be entered here";

/// Passing details for a dog whose health status is `PassedAway`.
///
/// Bundling the three fields guarantees they are present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassingInfo {
    /// When the dog passed away.
    pub passing_date: OffsetDateTime,
    /// The cause of death.
    pub passing_reason: String,
    /// Where the dog was buried.
    pub burial_place: String,
}

impl PassingInfo {
    /// Creates new `PassingInfo`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingPassingInfo` if the reason or burial
    /// place is empty.
    pub fn new(
        passing_date: OffsetDateTime,
        passing_reason: String,
        burial_place: String,
    ) -> Result<Self, DomainError> {
        if passing_reason.trim().is_empty() {
            return Err(DomainError::MissingPassingInfo {
                field: "Passing reason",
            });
        }
        if burial_place.trim().is_empty() {
            return Err(DomainError::MissingPassingInfo {
                field: "Burial place",
            });
        }
        Ok(Self {
            passing_date,
            passing_reason,
            burial_place,
        })
    }
}

/// Intake attributes supplied when registering a dog.
#[derive(Debug, Clone, PartialEq)]
pub struct DogIntake {
    /// The dog's name (normalized to title case on registration).
    pub name: String,
    /// Age in months.
    pub age_months: i32,
    pub gender: DogGender,
    pub breed: DogBreed,
    pub color: DogColor,
    /// Why the dog entered the shelter.
    pub intake_reason: IntakeReason,
    /// When the dog arrived.
    pub arrival_date: OffsetDateTime,
    pub microchip_status: TripleChoice,
    /// Microchip id; required (and unique) when `microchip_status` is Yes.
    pub microchip_id: Option<String>,
    /// Initial weight; recorded as the first weight history entry.
    pub initial_weight_kg: Option<f64>,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Free-text physical description.
    pub detailed_description: String,
    pub health_status: HealthStatus,
    pub vaccination_status: VaccinationStatus,
    pub castration_status: TripleChoice,
    pub adoption_status: AdoptionStatus,
    /// Owner on file; required for training intakes, absent otherwise.
    pub owner_id: Option<i64>,
    pub special_needs: String,
    pub behavioral_notes: String,
    pub other_notes: String,
}

/// A dog housed by a charter.
#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the dog has not been persisted yet.
    pub dog_id: Option<i64>,
    /// The charter housing this dog.
    pub charter_id: i64,
    pub name: String,
    pub age_months: i32,
    pub gender: DogGender,
    pub breed: DogBreed,
    pub color: DogColor,
    pub intake_reason: IntakeReason,
    pub arrival_date: OffsetDateTime,
    pub microchip_status: TripleChoice,
    pub microchip_id: Option<String>,
    /// Write-through cache of the most recent weight entry.
    pub current_weight_kg: Option<f64>,
    pub height_cm: f64,
    pub detailed_description: String,
    pub health_status: HealthStatus,
    pub vaccination_status: VaccinationStatus,
    pub castration_status: TripleChoice,
    pub adoption_status: AdoptionStatus,
    /// The adoptee that owns this dog. Set only on adoption approval, or
    /// at intake for dogs boarded for training.
    pub owner_id: Option<i64>,
    /// Passing details; present iff `health_status` is `PassedAway`.
    pub passing: Option<PassingInfo>,
    pub health_record: String,
    pub vaccination_record: String,
    pub treatment_record: String,
    pub special_needs: String,
    pub behavioral_notes: String,
    pub other_notes: String,
}

impl Dog {
    /// Creates a new `Dog` from intake attributes, without a persisted ID.
    ///
    /// The name is normalized to title case and the free-text record
    /// fields are seeded with their templates. The initial weight (if
    /// any) becomes `current_weight_kg`; the persistence layer writes the
    /// matching first weight history entry.
    #[must_use]
    pub fn register(charter_id: i64, intake: DogIntake) -> Self {
        Self {
            dog_id: None,
            charter_id,
            name: title_case(&intake.name),
            age_months: intake.age_months,
            gender: intake.gender,
            breed: intake.breed,
            color: intake.color,
            intake_reason: intake.intake_reason,
            arrival_date: intake.arrival_date,
            microchip_status: intake.microchip_status,
            microchip_id: intake.microchip_id,
            current_weight_kg: intake.initial_weight_kg,
            height_cm: intake.height_cm,
            detailed_description: intake.detailed_description,
            health_status: intake.health_status,
            vaccination_status: intake.vaccination_status,
            castration_status: intake.castration_status,
            adoption_status: intake.adoption_status,
            owner_id: intake.owner_id,
            passing: None,
            health_record: String::from(HEALTH_RECORD_TEMPLATE),
            vaccination_record: String::from(VACCINATION_RECORD_TEMPLATE),
            treatment_record: String::from(TREATMENT_RECORD_TEMPLATE),
            special_needs: intake.special_needs,
            behavioral_notes: intake.behavioral_notes,
            other_notes: intake.other_notes,
        }
    }

    /// Validates the dog's cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any field-local rule fails (see `validate_dog_fields`)
    /// - The dog is marked adopted without an owner
    /// - The dog is passed away without complete passing details
    /// - The dog is passed away while still marked as in trial
    pub fn validate(&self) -> Result<(), DomainError> {
        crate::validation::validate_dog_fields(self)?;

        if self.adoption_status == AdoptionStatus::Adopted && self.owner_id.is_none() {
            return Err(DomainError::AdoptedWithoutOwner);
        }

        if self.health_status == HealthStatus::PassedAway {
            if self.passing.is_none() {
                return Err(DomainError::MissingPassingInfo {
                    field: "Passing date",
                });
            }
            // A dead dog cannot be in an active trial; force-closure
            // resolves the trial before this state is persisted.
            if self.adoption_status == AdoptionStatus::Trial {
                return Err(DomainError::HealthAdoptionMismatch {
                    health: self.health_status,
                    adoption: self.adoption_status,
                });
            }
        }

        Ok(())
    }
}

/// An append-only weight history entry.
///
/// Each recorded entry writes its value through to the dog's
/// `current_weight_kg` (newest wins). History reads newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct DogWeightRecord {
    /// The canonical numeric identifier assigned by the database.
    weight_record_id: Option<i64>,
    /// The dog this entry belongs to.
    pub dog_id: i64,
    /// When the weight was taken.
    pub record_date: OffsetDateTime,
    /// The measured weight. Strictly positive.
    pub weight_kg: f64,
}

impl DogWeightRecord {
    /// Creates a new weight entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeight` if `weight_kg` is not
    /// strictly positive.
    pub fn new(
        dog_id: i64,
        record_date: OffsetDateTime,
        weight_kg: f64,
    ) -> Result<Self, DomainError> {
        if weight_kg <= 0.0 {
            return Err(DomainError::InvalidWeight { weight_kg });
        }
        Ok(Self {
            weight_record_id: None,
            dog_id,
            record_date,
            weight_kg,
        })
    }

    /// Creates a weight entry with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        weight_record_id: i64,
        dog_id: i64,
        record_date: OffsetDateTime,
        weight_kg: f64,
    ) -> Self {
        Self {
            weight_record_id: Some(weight_record_id),
            dog_id,
            record_date,
            weight_kg,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn weight_record_id(&self) -> Option<i64> {
        self.weight_record_id
    }
}

/// A photo attached to a dog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogPhotoRecord {
    /// The canonical numeric identifier assigned by the database.
    photo_record_id: Option<i64>,
    pub dog_id: i64,
    /// A short label for the photo.
    pub name: String,
    /// Storage path of the image, if an image was uploaded.
    pub photo_path: Option<String>,
    /// Whether this photo is the dog's profile photo.
    pub is_profile_photo: bool,
    /// When the photo was uploaded.
    pub uploaded: OffsetDateTime,
}

impl DogPhotoRecord {
    /// Creates a new photo record without a persisted ID.
    #[must_use]
    pub const fn new(
        dog_id: i64,
        name: String,
        photo_path: Option<String>,
        is_profile_photo: bool,
        uploaded: OffsetDateTime,
    ) -> Self {
        Self {
            photo_record_id: None,
            dog_id,
            name,
            photo_path,
            is_profile_photo,
            uploaded,
        }
    }

    /// Creates a photo record with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        photo_record_id: i64,
        dog_id: i64,
        name: String,
        photo_path: Option<String>,
        is_profile_photo: bool,
        uploaded: OffsetDateTime,
    ) -> Self {
        Self {
            photo_record_id: Some(photo_record_id),
            dog_id,
            name,
            photo_path,
            is_profile_photo,
            uploaded,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn photo_record_id(&self) -> Option<i64> {
        self.photo_record_id
    }
}

/// A document attached to a dog (vet report, intake form, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogDocumentRecord {
    /// The canonical numeric identifier assigned by the database.
    document_record_id: Option<i64>,
    pub dog_id: i64,
    pub title: String,
    /// Storage path of the document file.
    pub document_path: String,
    /// Free-form document category.
    pub document_type: String,
    pub description: String,
    /// When the document was uploaded.
    pub uploaded: OffsetDateTime,
}

impl DogDocumentRecord {
    /// Creates a new document record without a persisted ID.
    #[must_use]
    pub const fn new(
        dog_id: i64,
        title: String,
        document_path: String,
        document_type: String,
        description: String,
        uploaded: OffsetDateTime,
    ) -> Self {
        Self {
            document_record_id: None,
            dog_id,
            title,
            document_path,
            document_type,
            description,
            uploaded,
        }
    }

    /// Creates a document record with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        document_record_id: i64,
        dog_id: i64,
        title: String,
        document_path: String,
        document_type: String,
        description: String,
        uploaded: OffsetDateTime,
    ) -> Self {
        Self {
            document_record_id: Some(document_record_id),
            dog_id,
            title,
            document_path,
            document_type,
            description,
            uploaded,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn document_record_id(&self) -> Option<i64> {
        self.document_record_id
    }
}

/// Resolves the best available photo path for a dog.
///
/// Priority: the photo flagged as profile photo, then the first attached
/// photo, then the charter's default photo, then the static placeholder.
/// `photos` is expected in storage order (profile-first, then upload
/// time), but the profile flag is honored regardless of position.
#[must_use]
pub fn resolve_display_photo(photos: &[DogPhotoRecord], charter_default: Option<&str>) -> String {
    let profile_photo: Option<String> = photos
        .iter()
        .filter(|p| p.is_profile_photo)
        .find_map(|p| p.photo_path.clone());
    if let Some(path) = profile_photo {
        return path;
    }

    if let Some(path) = photos.iter().find_map(|p| p.photo_path.clone()) {
        return path;
    }

    if let Some(default) = charter_default {
        return default.to_string();
    }

    String::from(DEFAULT_DOG_PHOTO_PATH)
}
