// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Adoption record lookups.
//!
//! `has_active_record` and `has_approved_record` are the engine's
//! uniqueness facts. They must be read inside the transaction that
//! commits the transition they guard; reading them earlier reintroduces
//! the check-then-act race the engine exists to prevent.

use crate::data_models::AdoptionRecordRow;
use crate::diesel_schema::adoption_records;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven_domain::{AdoptionRecord, AdoptionResult};

/// Loads an adoption record.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist.
pub fn get_record(
    conn: &mut SqliteConnection,
    adoption_record_id: i64,
) -> Result<AdoptionRecord, PersistenceError> {
    let row: AdoptionRecordRow = adoption_records::table
        .filter(adoption_records::adoption_record_id.eq(adoption_record_id))
        .first(conn)?;
    row.into_domain()
}

/// Checks whether any record for the dog is still active.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_active_record(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = adoption_records::table
        .filter(adoption_records::dog_id.eq(dog_id))
        .filter(adoption_records::is_active.eq(1))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Checks whether any record for the dog was approved.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_approved_record(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = adoption_records::table
        .filter(adoption_records::dog_id.eq(dog_id))
        .filter(adoption_records::result.eq(AdoptionResult::Approved.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Loads every active record on a dog.
///
/// The lifecycle guarantees at most one, but force-closure deliberately
/// sweeps whatever is there.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn active_records_for_dog(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<AdoptionRecord>, PersistenceError> {
    let rows: Vec<AdoptionRecordRow> = adoption_records::table
        .filter(adoption_records::dog_id.eq(dog_id))
        .filter(adoption_records::is_active.eq(1))
        .load(conn)?;
    rows.into_iter()
        .map(AdoptionRecordRow::into_domain)
        .collect()
}

/// Loads a dog's full adoption history, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn records_for_dog(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<AdoptionRecord>, PersistenceError> {
    let rows: Vec<AdoptionRecordRow> = adoption_records::table
        .filter(adoption_records::dog_id.eq(dog_id))
        .order(adoption_records::created.desc())
        .load(conn)?;
    rows.into_iter()
        .map(AdoptionRecordRow::into_domain)
        .collect()
}

/// Counts the adoption records referencing an adoptee.
///
/// Used for delete protection: an adoptee with adoption history cannot
/// be removed.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn adoptee_record_count(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(adoption_records::table
        .filter(adoption_records::adoptee_id.eq(adoptee_id))
        .count()
        .get_result(conn)?)
}
