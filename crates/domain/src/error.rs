// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::{AdoptionStatus, HealthStatus};

/// The identity field on which a uniqueness violation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    /// The entity name (matched case-insensitively).
    Name,
    /// The entity email address.
    Email,
    /// The entity phone number.
    Phone,
}

impl IdentityField {
    /// Returns the human-readable field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// The specific precondition an adoption transition failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibilityReason {
    /// The dog's health status forbids adoption activity.
    DogHealth(HealthStatus),
    /// The dog's adoption status forbids opening a process.
    DogStatus(AdoptionStatus),
    /// The adoptee's adoption status forbids opening a process.
    AdopteeStatus(AdoptionStatus),
    /// The dog already has an active adoption process.
    DuplicateActive,
    /// The dog already has an approved adoption process.
    DuplicateApproved,
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DogHealth(HealthStatus::PassedAway) => {
                write!(f, "Dog is passed away and cannot be adopted")
            }
            Self::DogHealth(status) => {
                write!(
                    f,
                    "Dog health status must be specified before an adoption process (got '{}')",
                    status.as_str()
                )
            }
            Self::DogStatus(status) => {
                write!(f, "Dog is not eligible for adoption (status '{}')", status.as_str())
            }
            Self::AdopteeStatus(status) => {
                write!(
                    f,
                    "Adoptee is not eligible for adoption (status '{}')",
                    status.as_str()
                )
            }
            Self::DuplicateActive => write!(f, "Dog already has an active adoption process"),
            Self::DuplicateApproved => write!(f, "Dog already has an approved adoption process"),
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Neither email nor phone was provided for an entity.
    MissingContactMethod,
    /// An identity field value is already registered to another entity.
    DuplicateIdentity {
        /// The field that collided.
        field: IdentityField,
        /// The colliding value.
        value: String,
    },
    /// The microchip id is already registered to another dog.
    DuplicateMicrochipId(String),
    /// A name field is empty or invalid.
    InvalidName(String),
    /// Dog age must not be negative.
    InvalidAgeMonths(i32),
    /// Dog height must be positive.
    InvalidHeight {
        /// The invalid height value.
        height_cm: f64,
    },
    /// Weight entries must be strictly positive.
    InvalidWeight {
        /// The invalid weight value.
        weight_kg: f64,
    },
    /// Microchip id is required when microchip status is Yes.
    MicrochipIdRequired,
    /// A dog taken in for training must have an owner on file.
    OwnerRequiredForTraining,
    /// A dog marked adopted must have an owner.
    AdoptedWithoutOwner,
    /// A passing-related field is missing for a passed-away dog.
    MissingPassingInfo {
        /// The missing field.
        field: &'static str,
    },
    /// Health status and adoption status contradict each other.
    HealthAdoptionMismatch {
        /// The dog's health status.
        health: HealthStatus,
        /// The dog's adoption status.
        adoption: AdoptionStatus,
    },
    /// An adoptee carries a status reserved for the dog side.
    InvalidAdopteeStatus(AdoptionStatus),
    /// An adoption transition precondition failed.
    AdoptionIneligible(IneligibilityReason),
    /// A resolve was attempted on a process that is no longer active.
    ProcessNotActive {
        /// The result the process already closed with.
        result: crate::status::AdoptionResult,
    },
    /// A delete was blocked by live references.
    ReferentialIntegrity {
        /// The entity that could not be deleted.
        entity: String,
        /// Why the delete was blocked.
        reason: String,
    },
    /// A post-transition sanity check failed.
    ///
    /// This indicates an engine bug and should never surface in correct
    /// operation. Callers must treat it as fatal, not as a user error.
    InconsistentState(String),
    /// A stored or supplied choice string is not a member of its enum.
    InvalidChoice {
        /// The kind of choice being parsed.
        kind: &'static str,
        /// The unrecognized value.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContactMethod => write!(f, "Email or phone is required"),
            Self::DuplicateIdentity { field, value } => {
                write!(f, "An entity with {} '{value}' already exists", field.as_str())
            }
            Self::DuplicateMicrochipId(id) => {
                write!(f, "Microchip ID '{id}' already exists")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidAgeMonths(age) => {
                write!(f, "Invalid age: {age} months. Must not be negative")
            }
            Self::InvalidHeight { height_cm } => {
                write!(f, "Invalid height: {height_cm} cm. Must be greater than 0")
            }
            Self::InvalidWeight { weight_kg } => {
                write!(f, "Invalid weight: {weight_kg} kg. Must be greater than 0")
            }
            Self::MicrochipIdRequired => {
                write!(f, "Microchip ID is required when microchip status is Yes")
            }
            Self::OwnerRequiredForTraining => {
                write!(f, "Owner is required if the dog is being trained")
            }
            Self::AdoptedWithoutOwner => write!(f, "Dog is adopted but has no owner"),
            Self::MissingPassingInfo { field } => {
                write!(f, "{field} is required if the dog is passed away")
            }
            Self::HealthAdoptionMismatch { health, adoption } => {
                write!(
                    f,
                    "Health status and adoption status mismatch: '{}' - '{}'",
                    health.as_str(),
                    adoption.as_str()
                )
            }
            Self::InvalidAdopteeStatus(status) => {
                write!(f, "Invalid adoption status for adoptee: '{}'", status.as_str())
            }
            Self::AdoptionIneligible(reason) => write!(f, "{reason}"),
            Self::ProcessNotActive { result } => {
                write!(
                    f,
                    "Adoption process is already closed with result '{}'",
                    result.as_str()
                )
            }
            Self::ReferentialIntegrity { entity, reason } => {
                write!(f, "{entity} cannot be deleted: {reason}")
            }
            Self::InconsistentState(detail) => {
                write!(f, "Inconsistent adoption state: {detail}")
            }
            Self::InvalidChoice { kind, value } => {
                write!(f, "Unknown {kind}: '{value}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
