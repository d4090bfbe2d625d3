// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dog, attachment and weight history reads.

use crate::data_models::{DocumentRecordRow, DogRow, PhotoRecordRow, WeightRecordRow};
use crate::diesel_schema::{dog_document_records, dog_photo_records, dog_weight_records, dogs};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use pawhaven_domain::{Dog, DogDocumentRecord, DogPhotoRecord, DogWeightRecord};

/// Loads a dog.
///
/// # Errors
///
/// Returns `NotFound` if the dog does not exist, or a
/// `ReconstructionError` if the stored row no longer parses.
pub fn get_dog(conn: &mut SqliteConnection, dog_id: i64) -> Result<Dog, PersistenceError> {
    let row: DogRow = dogs::table.filter(dogs::dog_id.eq(dog_id)).first(conn)?;
    row.into_domain()
}

/// Loads all dogs housed by a charter, newest intake first.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn dogs_for_charter(
    conn: &mut SqliteConnection,
    charter_id: i64,
) -> Result<Vec<Dog>, PersistenceError> {
    let rows: Vec<DogRow> = dogs::table
        .filter(dogs::charter_id.eq(charter_id))
        .order(dogs::created.desc())
        .load(conn)?;
    rows.into_iter().map(DogRow::into_domain).collect()
}

/// Loads all dogs owned by an adoptee.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn dogs_owned_by(
    conn: &mut SqliteConnection,
    adoptee_id: i64,
) -> Result<Vec<Dog>, PersistenceError> {
    let rows: Vec<DogRow> = dogs::table
        .filter(dogs::owner_adoptee_id.eq(adoptee_id))
        .order(dogs::created.desc())
        .load(conn)?;
    rows.into_iter().map(DogRow::into_domain).collect()
}

/// Checks whether a microchip id is already registered to another dog.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn microchip_exists(
    conn: &mut SqliteConnection,
    microchip_id: &str,
    exclude_dog: Option<i64>,
) -> Result<bool, PersistenceError> {
    let count: i64 = match exclude_dog {
        Some(id) => dogs::table
            .filter(dogs::microchip_id.eq(microchip_id))
            .filter(dogs::dog_id.ne(id))
            .count()
            .get_result(conn)?,
        None => dogs::table
            .filter(dogs::microchip_id.eq(microchip_id))
            .count()
            .get_result(conn)?,
    };
    Ok(count > 0)
}

/// Loads a dog's weight history, newest entry first.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn weight_history(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<DogWeightRecord>, PersistenceError> {
    let rows: Vec<WeightRecordRow> = dog_weight_records::table
        .filter(dog_weight_records::dog_id.eq(dog_id))
        .order(dog_weight_records::record_date.desc())
        .load(conn)?;
    rows.into_iter().map(WeightRecordRow::into_domain).collect()
}

/// Loads a dog's photos, profile photo first, then upload order.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn photos_for_dog(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<DogPhotoRecord>, PersistenceError> {
    let rows: Vec<PhotoRecordRow> = dog_photo_records::table
        .filter(dog_photo_records::dog_id.eq(dog_id))
        .order((
            dog_photo_records::is_profile_photo.desc(),
            dog_photo_records::uploaded.asc(),
        ))
        .load(conn)?;
    rows.into_iter().map(PhotoRecordRow::into_domain).collect()
}

/// Loads a dog's documents, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not parse.
pub fn documents_for_dog(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<DogDocumentRecord>, PersistenceError> {
    let rows: Vec<DocumentRecordRow> = dog_document_records::table
        .filter(dog_document_records::dog_id.eq(dog_id))
        .order(dog_document_records::uploaded.desc())
        .load(conn)?;
    rows.into_iter()
        .map(DocumentRecordRow::into_domain)
        .collect()
}
