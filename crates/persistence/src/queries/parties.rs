// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity, charter, contact and adoptee lookups plus the global identity
//! uniqueness checks.

use crate::data_models::{AdopteeRow, ContactRow, EntityInfoRow};
use crate::diesel_schema::{adoptees, charters, contacts, dogs, entity_info};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{SqliteConnection, define_sql_function};
use pawhaven_domain::{Adoptee, Charter, Contact, EntityInfo};

define_sql_function! {
    /// SQL `lower()`, used for the case-insensitive name uniqueness check.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Checks whether an entity name is already registered, case-insensitively.
///
/// `exclude` skips the entity itself when re-validating a correction edit.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn name_exists(
    conn: &mut SqliteConnection,
    name: &str,
    exclude: Option<i64>,
) -> Result<bool, PersistenceError> {
    let count: i64 = match exclude {
        Some(id) => entity_info::table
            .filter(lower(entity_info::name).eq(name.to_lowercase()))
            .filter(entity_info::entity_info_id.ne(id))
            .count()
            .get_result(conn)?,
        None => entity_info::table
            .filter(lower(entity_info::name).eq(name.to_lowercase()))
            .count()
            .get_result(conn)?,
    };
    Ok(count > 0)
}

/// Checks whether an email is already registered.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn email_exists(
    conn: &mut SqliteConnection,
    email: &str,
    exclude: Option<i64>,
) -> Result<bool, PersistenceError> {
    let count: i64 = match exclude {
        Some(id) => entity_info::table
            .filter(entity_info::email.eq(email))
            .filter(entity_info::entity_info_id.ne(id))
            .count()
            .get_result(conn)?,
        None => entity_info::table
            .filter(entity_info::email.eq(email))
            .count()
            .get_result(conn)?,
    };
    Ok(count > 0)
}

/// Checks whether a phone number is already registered.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn phone_exists(
    conn: &mut SqliteConnection,
    phone: &str,
    exclude: Option<i64>,
) -> Result<bool, PersistenceError> {
    let count: i64 = match exclude {
        Some(id) => entity_info::table
            .filter(entity_info::phone.eq(phone))
            .filter(entity_info::entity_info_id.ne(id))
            .count()
            .get_result(conn)?,
        None => entity_info::table
            .filter(entity_info::phone.eq(phone))
            .count()
            .get_result(conn)?,
    };
    Ok(count > 0)
}

/// Loads an entity info record.
///
/// # Errors
///
/// Returns `NotFound` if the entity does not exist.
pub fn get_entity_info(
    conn: &mut SqliteConnection,
    entity_info_id: i64,
) -> Result<EntityInfo, PersistenceError> {
    let row: EntityInfoRow = entity_info::table
        .filter(entity_info::entity_info_id.eq(entity_info_id))
        .first(conn)?;
    Ok(row.into_domain())
}

/// Loads a charter with its entity info.
///
/// # Errors
///
/// Returns `NotFound` if the charter does not exist.
pub fn get_charter(
    conn: &mut SqliteConnection,
    charter_id: i64,
) -> Result<Charter, PersistenceError> {
    let (id, entity_info_id, default_photo_path): (i64, i64, Option<String>) = charters::table
        .filter(charters::charter_id.eq(charter_id))
        .first(conn)?;
    let entity: EntityInfo = get_entity_info(conn, entity_info_id)?;
    Ok(Charter::with_id(id, entity, default_photo_path))
}

/// Loads a contact with its entity info.
///
/// # Errors
///
/// Returns `NotFound` if the contact does not exist.
pub fn get_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
) -> Result<Contact, PersistenceError> {
    let row: ContactRow = contacts::table
        .filter(contacts::contact_id.eq(contact_id))
        .first(conn)?;
    let entity: EntityInfo = get_entity_info(conn, row.entity_info_id)?;
    row.into_domain(entity)
}

/// Loads an adoptee with its contact and entity info.
///
/// # Errors
///
/// Returns `NotFound` if the adoptee does not exist.
pub fn get_adoptee(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
) -> Result<Adoptee, PersistenceError> {
    let row: AdopteeRow = adoptees::table
        .filter(adoptees::adoptee_id.eq(adoptee_id))
        .first(conn)?;
    let contact: Contact = get_contact(conn, row.contact_id)?;
    row.into_domain(contact)
}

/// Returns the adoptee extension id for a contact, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn adoptee_id_for_contact(
    conn: &mut SqliteConnection,
    contact_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let id: Option<i64> = adoptees::table
        .filter(adoptees::contact_id.eq(contact_id))
        .select(adoptees::adoptee_id)
        .first(conn)
        .optional()?;
    Ok(id)
}

/// Counts the dogs housed by a charter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn charter_dog_count(
    conn: &mut SqliteConnection,
    charter_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(dogs::table
        .filter(dogs::charter_id.eq(charter_id))
        .count()
        .get_result(conn)?)
}

/// Counts the adoptees registered with a charter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn charter_adoptee_count(
    conn: &mut SqliteConnection,
    charter_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(adoptees::table
        .filter(adoptees::charter_id.eq(charter_id))
        .count()
        .get_result(conn)?)
}

/// Counts the dogs owned by an adoptee.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn adoptee_owned_dog_count(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(dogs::table
        .filter(dogs::owner_adoptee_id.eq(adoptee_id))
        .count()
        .get_result(conn)?)
}
