// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dog::Dog;
use crate::error::DomainError;
use crate::status::{IntakeReason, TripleChoice};

/// Normalizes a name to title case.
///
/// Each alphabetic run starts with an uppercase letter and continues in
/// lowercase, so `"bella the  brave"` becomes `"Bella The  Brave"` and
/// `"o'malley"` becomes `"O'Malley"`. Applied once, at first registration;
/// later corrections keep the caller's casing.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut result: String = String::with_capacity(name.len());
    let mut at_word_start: bool = true;

    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }

    result
}

/// Validates a dog's basic field constraints.
///
/// This checks field-local rules only. Uniqueness of the microchip id
/// requires context and is checked by the persistence layer inside the
/// write transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The age is negative
/// - The height is not positive
/// - Microchip status is Yes without a microchip id
/// - The dog is boarded for training without an owner on file
pub fn validate_dog_fields(dog: &Dog) -> Result<(), DomainError> {
    if dog.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Dog name cannot be empty",
        )));
    }

    if dog.age_months < 0 {
        return Err(DomainError::InvalidAgeMonths(dog.age_months));
    }

    if dog.height_cm <= 0.0 {
        return Err(DomainError::InvalidHeight {
            height_cm: dog.height_cm,
        });
    }

    if dog.microchip_status == TripleChoice::Yes && dog.microchip_id.is_none() {
        return Err(DomainError::MicrochipIdRequired);
    }

    if dog.intake_reason == IntakeReason::Training && dog.owner_id.is_none() {
        return Err(DomainError::OwnerRequiredForTraining);
    }

    Ok(())
}
