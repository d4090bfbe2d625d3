// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity, charter, contact and adoptee writes.
//!
//! Identity uniqueness is re-checked here, inside the caller's
//! transaction, immediately before the write; the unique indexes in the
//! schema are the second line of defense.

use crate::data_models::format_timestamp;
use crate::diesel_schema::{adoptees, charters, contacts, entity_info};
use crate::error::PersistenceError;
use crate::queries::adoptions::adoptee_record_count;
use crate::queries::parties::{
    adoptee_id_for_contact, adoptee_owned_dog_count, charter_adoptee_count, charter_dog_count,
    email_exists, name_exists, phone_exists,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven_domain::{AdoptionStatus, DomainError, EntityInfo, IdentityField};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Validates an entity's identity against the directory and inserts it.
///
/// Returns the generated entity info ID.
///
/// # Errors
///
/// Returns `MissingContactMethod` or `DuplicateIdentity` on a rule
/// violation, or a database error if the insert fails.
pub fn register_entity_info(
    conn: &mut SqliteConnection,
    entity: &EntityInfo,
) -> Result<i64, PersistenceError> {
    entity.validate()?;
    check_identity_unique(conn, entity, None)?;

    diesel::insert_into(entity_info::table)
        .values((
            entity_info::name.eq(&entity.name),
            entity_info::email.eq(&entity.email),
            entity_info::phone.eq(&entity.phone),
            entity_info::address.eq(&entity.address),
        ))
        .execute(conn)?;

    let entity_info_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;
    debug!(entity_info_id, name = %entity.name, "Registered entity");
    Ok(entity_info_id)
}

/// Re-validates and saves a correction edit to an entity.
///
/// The stored casing of the supplied name is kept; normalization happens
/// only at first registration.
///
/// # Errors
///
/// Returns a domain error on a rule violation, or `NotFound` if the
/// entity does not exist.
pub fn update_entity_info(
    conn: &mut SqliteConnection,
    entity: &EntityInfo,
) -> Result<(), PersistenceError> {
    let entity_info_id: i64 = entity.entity_info_id().ok_or_else(|| {
        PersistenceError::NotFound(String::from("Entity has no persisted id"))
    })?;

    entity.validate()?;
    check_identity_unique(conn, entity, Some(entity_info_id))?;

    let rows: usize = diesel::update(
        entity_info::table.filter(entity_info::entity_info_id.eq(entity_info_id)),
    )
    .set((
        entity_info::name.eq(&entity.name),
        entity_info::email.eq(&entity.email),
        entity_info::phone.eq(&entity.phone),
        entity_info::address.eq(&entity.address),
    ))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Entity {entity_info_id} not found"
        )));
    }
    Ok(())
}

fn check_identity_unique(
    conn: &mut SqliteConnection,
    entity: &EntityInfo,
    exclude: Option<i64>,
) -> Result<(), PersistenceError> {
    if name_exists(conn, &entity.name, exclude)? {
        return Err(PersistenceError::DomainViolation(
            DomainError::DuplicateIdentity {
                field: IdentityField::Name,
                value: entity.name.clone(),
            },
        ));
    }
    if let Some(email) = &entity.email
        && email_exists(conn, email, exclude)?
    {
        return Err(PersistenceError::DomainViolation(
            DomainError::DuplicateIdentity {
                field: IdentityField::Email,
                value: email.clone(),
            },
        ));
    }
    if let Some(phone) = &entity.phone
        && phone_exists(conn, phone, exclude)?
    {
        return Err(PersistenceError::DomainViolation(
            DomainError::DuplicateIdentity {
                field: IdentityField::Phone,
                value: phone.clone(),
            },
        ));
    }
    Ok(())
}

/// Inserts a charter wrapping an already-registered entity.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_charter(
    conn: &mut SqliteConnection,
    entity_info_id: i64,
    default_photo_path: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(charters::table)
        .values((
            charters::entity_info_id.eq(entity_info_id),
            charters::default_photo_path.eq(default_photo_path),
        ))
        .execute(conn)?;
    let charter_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;
    info!(charter_id, "Created charter");
    Ok(charter_id)
}

/// Inserts a contact wrapping an already-registered entity, stamping
/// created/modified.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_contact(
    conn: &mut SqliteConnection,
    entity_info_id: i64,
    notes: &str,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let now_str: String = format_timestamp(now)?;
    diesel::insert_into(contacts::table)
        .values((
            contacts::entity_info_id.eq(entity_info_id),
            contacts::notes.eq(notes),
            contacts::created.eq(&now_str),
            contacts::modified.eq(&now_str),
        ))
        .execute(conn)?;
    let contact_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;
    debug!(contact_id, "Created contact");
    Ok(contact_id)
}

/// Restamps a contact's modified timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn touch_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(contacts::table.filter(contacts::contact_id.eq(contact_id)))
        .set(contacts::modified.eq(format_timestamp(now)?))
        .execute(conn)?;
    Ok(())
}

/// Inserts an adoptee extension for a contact.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_adoptee(
    conn: &mut SqliteConnection,
    contact_id: i64,
    charter_id: i64,
    status: AdoptionStatus,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(adoptees::table)
        .values((
            adoptees::contact_id.eq(contact_id),
            adoptees::charter_id.eq(charter_id),
            adoptees::adoption_status.eq(status.as_str()),
        ))
        .execute(conn)?;
    let adoptee_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;
    debug!(adoptee_id, contact_id, charter_id, "Created adoptee");
    Ok(adoptee_id)
}

/// Updates an adoptee's adoption status.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_adoptee_status(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
    status: AdoptionStatus,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(adoptees::table.filter(adoptees::adoptee_id.eq(adoptee_id)))
        .set(adoptees::adoption_status.eq(status.as_str()))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Adoptee {adoptee_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a charter and its entity info, blocked while dogs or adoptees
/// reference it.
///
/// # Errors
///
/// Returns `ReferentialIntegrity` when live references exist.
pub fn delete_charter(
    conn: &mut SqliteConnection,
    charter_id: i64,
) -> Result<(), PersistenceError> {
    let dog_count: i64 = charter_dog_count(conn, charter_id)?;
    let adoptee_count: i64 = charter_adoptee_count(conn, charter_id)?;
    if dog_count > 0 || adoptee_count > 0 {
        return Err(PersistenceError::DomainViolation(
            DomainError::ReferentialIntegrity {
                entity: String::from("Charter"),
                reason: format!(
                    "there are {dog_count} dog(s) and {adoptee_count} adoptee(s) associated with it"
                ),
            },
        ));
    }

    let entity_info_id: i64 = charters::table
        .filter(charters::charter_id.eq(charter_id))
        .select(charters::entity_info_id)
        .first(conn)?;

    diesel::delete(charters::table.filter(charters::charter_id.eq(charter_id))).execute(conn)?;
    diesel::delete(entity_info::table.filter(entity_info::entity_info_id.eq(entity_info_id)))
        .execute(conn)?;
    info!(charter_id, "Deleted charter");
    Ok(())
}

/// Deletes a contact and its entity info, blocked while an adoptee
/// extension references it.
///
/// # Errors
///
/// Returns `ReferentialIntegrity` when the contact is an adoptee.
pub fn delete_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
) -> Result<(), PersistenceError> {
    if adoptee_id_for_contact(conn, contact_id)?.is_some() {
        return Err(PersistenceError::DomainViolation(
            DomainError::ReferentialIntegrity {
                entity: String::from("Contact"),
                reason: String::from("the contact is registered as an adoptee"),
            },
        ));
    }

    let entity_info_id: i64 = contacts::table
        .filter(contacts::contact_id.eq(contact_id))
        .select(contacts::entity_info_id)
        .first(conn)?;

    diesel::delete(contacts::table.filter(contacts::contact_id.eq(contact_id))).execute(conn)?;
    diesel::delete(entity_info::table.filter(entity_info::entity_info_id.eq(entity_info_id)))
        .execute(conn)?;
    info!(contact_id, "Deleted contact");
    Ok(())
}

/// Deletes an adoptee with its contact and entity info, blocked while
/// owned dogs or adoption history reference it.
///
/// # Errors
///
/// Returns `ReferentialIntegrity` when live references exist.
pub fn delete_adoptee(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
) -> Result<(), PersistenceError> {
    let owned_dogs: i64 = adoptee_owned_dog_count(conn, adoptee_id)?;
    if owned_dogs > 0 {
        return Err(PersistenceError::DomainViolation(
            DomainError::ReferentialIntegrity {
                entity: String::from("Adoptee"),
                reason: format!("there are {owned_dogs} dog(s) associated with it"),
            },
        ));
    }
    let record_count: i64 = adoptee_record_count(conn, adoptee_id)?;
    if record_count > 0 {
        return Err(PersistenceError::DomainViolation(
            DomainError::ReferentialIntegrity {
                entity: String::from("Adoptee"),
                reason: format!("there are {record_count} adoption record(s) referencing it"),
            },
        ));
    }

    let contact_id: i64 = adoptees::table
        .filter(adoptees::adoptee_id.eq(adoptee_id))
        .select(adoptees::contact_id)
        .first(conn)?;

    diesel::delete(adoptees::table.filter(adoptees::adoptee_id.eq(adoptee_id))).execute(conn)?;
    delete_contact(conn, contact_id)?;
    info!(adoptee_id, "Deleted adoptee");
    Ok(())
}
