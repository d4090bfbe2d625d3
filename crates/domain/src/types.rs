// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::status::AdoptionStatus;
use crate::validation::title_case;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Shared identity record for charters, contacts and adoptees.
///
/// Name, email and phone are each globally unique across all entities;
/// the name match is case-insensitive. Uniqueness requires context and is
/// enforced by the persistence layer inside the write transaction;
/// this type carries the field-local rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the entity has not been persisted yet.
    entity_info_id: Option<i64>,
    /// The entity's name, normalized to title case at first registration.
    pub name: String,
    /// Optional email address (unique if present).
    pub email: Option<String>,
    /// Optional phone number (unique if present).
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

impl EntityInfo {
    /// Creates a new `EntityInfo` without a persisted ID.
    ///
    /// The name is normalized to title case. Normalization happens only
    /// here; corrections to an already-registered entity keep the
    /// caller's casing.
    ///
    /// # Arguments
    ///
    /// * `name` - The entity's name
    /// * `email` - Optional email address
    /// * `phone` - Optional phone number
    /// * `address` - Optional postal address
    #[must_use]
    pub fn new(
        name: &str,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            entity_info_id: None,
            name: title_case(name),
            email,
            phone,
            address,
        }
    }

    /// Creates an `EntityInfo` with an existing persisted ID.
    ///
    /// The stored name is taken verbatim; no normalization is applied.
    #[must_use]
    pub const fn with_id(
        entity_info_id: i64,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            entity_info_id: Some(entity_info_id),
            name,
            email,
            phone,
            address,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn entity_info_id(&self) -> Option<i64> {
        self.entity_info_id
    }

    /// Validates the field-local identity rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingContactMethod` if neither email nor
    /// phone is present, or `DomainError::InvalidName` if the name is
    /// empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "Entity name cannot be empty",
            )));
        }
        if self.email.is_none() && self.phone.is_none() {
            return Err(DomainError::MissingContactMethod);
        }
        Ok(())
    }
}

/// A shelter or rescue organization.
///
/// A charter is the scope for dogs and adoptees. It owns exactly one
/// `EntityInfo` and has no independent mutable state beyond its default
/// photo, used as a display fallback for dogs without attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charter {
    /// The canonical numeric identifier assigned by the database.
    charter_id: Option<i64>,
    /// The charter's identity record.
    pub entity_info: EntityInfo,
    /// Optional fallback photo path for dogs housed by this charter.
    pub default_photo_path: Option<String>,
}

impl Charter {
    /// Creates a new `Charter` without a persisted ID.
    #[must_use]
    pub const fn new(entity_info: EntityInfo, default_photo_path: Option<String>) -> Self {
        Self {
            charter_id: None,
            entity_info,
            default_photo_path,
        }
    }

    /// Creates a `Charter` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        charter_id: i64,
        entity_info: EntityInfo,
        default_photo_path: Option<String>,
    ) -> Self {
        Self {
            charter_id: Some(charter_id),
            entity_info,
            default_photo_path,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn charter_id(&self) -> Option<i64> {
        self.charter_id
    }
}

/// A person on file: a potential adopter or general correspondent.
///
/// Created/modified timestamps are stamped by the persistence layer on
/// first save and every save respectively; both are `None` until the
/// first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// The canonical numeric identifier assigned by the database.
    contact_id: Option<i64>,
    /// The contact's identity record.
    pub entity_info: EntityInfo,
    /// Free-text notes about the contact.
    pub notes: String,
    /// When the contact was first saved.
    pub created: Option<OffsetDateTime>,
    /// When the contact was last saved.
    pub modified: Option<OffsetDateTime>,
}

impl Contact {
    /// Creates a new `Contact` without a persisted ID.
    #[must_use]
    pub const fn new(entity_info: EntityInfo, notes: String) -> Self {
        Self {
            contact_id: None,
            entity_info,
            notes,
            created: None,
            modified: None,
        }
    }

    /// Creates a `Contact` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        contact_id: i64,
        entity_info: EntityInfo,
        notes: String,
        created: OffsetDateTime,
        modified: OffsetDateTime,
    ) -> Self {
        Self {
            contact_id: Some(contact_id),
            entity_info,
            notes,
            created: Some(created),
            modified: Some(modified),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn contact_id(&self) -> Option<i64> {
        self.contact_id
    }
}

/// A contact actively seeking to adopt, scoped to one charter.
///
/// Modeled as composition over `Contact` rather than inheritance: the
/// adoptee extension carries the charter scope and the adoption
/// eligibility status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adoptee {
    /// The canonical numeric identifier assigned by the database.
    adoptee_id: Option<i64>,
    /// The underlying contact record.
    pub contact: Contact,
    /// The charter this adoptee is registered with.
    pub charter_id: i64,
    /// Adoption eligibility. Only `Fit`, `Unfit` and `Trial` are legal.
    pub adoption_status: AdoptionStatus,
}

impl Adoptee {
    /// Creates a new `Adoptee` without a persisted ID.
    ///
    /// New adoptees start out `Fit`.
    #[must_use]
    pub const fn new(contact: Contact, charter_id: i64) -> Self {
        Self {
            adoptee_id: None,
            contact,
            charter_id,
            adoption_status: AdoptionStatus::Fit,
        }
    }

    /// Creates an `Adoptee` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        adoptee_id: i64,
        contact: Contact,
        charter_id: i64,
        adoption_status: AdoptionStatus,
    ) -> Self {
        Self {
            adoptee_id: Some(adoptee_id),
            contact,
            charter_id,
            adoption_status,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn adoptee_id(&self) -> Option<i64> {
        self.adoptee_id
    }

    /// Validates the adoptee status invariant.
    ///
    /// An adoptee never holds `Adopted` or `Unspecified`. When a dog is
    /// successfully placed the adoptee returns to `Fit`; if they cannot
    /// adopt they hold `Unfit`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAdopteeStatus` if the status is
    /// reserved for the dog side.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.adoption_status.valid_for_adoptee() {
            return Err(DomainError::InvalidAdopteeStatus(self.adoption_status));
        }
        Ok(())
    }
}
