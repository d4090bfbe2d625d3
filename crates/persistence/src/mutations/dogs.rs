// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dog registration and attachment writes.

use crate::data_models::{
    NewDocumentRecordRow, NewDogRow, NewPhotoRecordRow, NewWeightRecordRow, format_timestamp,
};
use crate::diesel_schema::{
    dog_document_records, dog_photo_records, dog_weight_records, dogs,
};
use crate::error::PersistenceError;
use crate::queries::dogs::microchip_exists;
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven_domain::{
    Dog, DogDocumentRecord, DogPhotoRecord, DogWeightRecord, DomainError,
};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Validates and inserts a dog, writing the first weight history entry
/// when an initial weight was supplied.
///
/// Returns the generated dog ID.
///
/// # Errors
///
/// Returns a domain error if the dog's invariants fail or the microchip
/// id is already registered, or a database error if the insert fails.
pub fn insert_dog(
    conn: &mut SqliteConnection,
    dog: &Dog,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    dog.validate()?;

    if let Some(microchip_id) = &dog.microchip_id
        && microchip_exists(conn, microchip_id, None)?
    {
        return Err(PersistenceError::DomainViolation(
            DomainError::DuplicateMicrochipId(microchip_id.clone()),
        ));
    }

    let row: NewDogRow = NewDogRow::from_domain(dog, now)?;
    diesel::insert_into(dogs::table).values(&row).execute(conn)?;
    let dog_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;

    // The intake weight becomes the first history entry.
    if let Some(weight_kg) = dog.current_weight_kg {
        let record: DogWeightRecord = DogWeightRecord::new(dog_id, now, weight_kg)?;
        insert_weight_record(conn, &record, now)?;
    }

    info!(dog_id, name = %dog.name, "Registered dog");
    Ok(dog_id)
}

/// Inserts a weight history entry and writes its value through to the
/// dog's `current_weight_kg`.
///
/// The recorded value wins regardless of older entries: most recent
/// entry is authoritative.
///
/// # Errors
///
/// Returns an error if the insert or the write-through update fails.
pub fn insert_weight_record(
    conn: &mut SqliteConnection,
    record: &DogWeightRecord,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let row: NewWeightRecordRow = NewWeightRecordRow {
        dog_id: record.dog_id,
        record_date: format_timestamp(record.record_date)?,
        weight_kg: record.weight_kg,
    };
    diesel::insert_into(dog_weight_records::table)
        .values(&row)
        .execute(conn)?;
    let weight_record_id: i64 = crate::backend::sqlite::get_last_insert_rowid(conn)?;

    diesel::update(dogs::table.filter(dogs::dog_id.eq(record.dog_id)))
        .set((
            dogs::current_weight_kg.eq(Some(record.weight_kg)),
            dogs::modified.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    debug!(
        weight_record_id,
        dog_id = record.dog_id,
        weight_kg = record.weight_kg,
        "Recorded weight"
    );
    Ok(weight_record_id)
}

/// Inserts a photo record.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_photo_record(
    conn: &mut SqliteConnection,
    record: &DogPhotoRecord,
) -> Result<i64, PersistenceError> {
    let row: NewPhotoRecordRow = NewPhotoRecordRow {
        dog_id: record.dog_id,
        name: record.name.clone(),
        photo_path: record.photo_path.clone(),
        is_profile_photo: i32::from(record.is_profile_photo),
        uploaded: format_timestamp(record.uploaded)?,
    };
    diesel::insert_into(dog_photo_records::table)
        .values(&row)
        .execute(conn)?;
    crate::backend::sqlite::get_last_insert_rowid(conn)
}

/// Inserts a document record.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_document_record(
    conn: &mut SqliteConnection,
    record: &DogDocumentRecord,
) -> Result<i64, PersistenceError> {
    let row: NewDocumentRecordRow = NewDocumentRecordRow {
        dog_id: record.dog_id,
        title: record.title.clone(),
        document_path: record.document_path.clone(),
        document_type: record.document_type.clone(),
        description: record.description.clone(),
        uploaded: format_timestamp(record.uploaded)?,
    };
    diesel::insert_into(dog_document_records::table)
        .values(&row)
        .execute(conn)?;
    crate::backend::sqlite::get_last_insert_rowid(conn)
}

/// Writes a dog's adoption-relevant columns after a lifecycle transition.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_dog_adoption(
    conn: &mut SqliteConnection,
    dog: &Dog,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let dog_id: i64 = dog.dog_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("Dog has no persisted id"))
    })?;

    let rows: usize = diesel::update(dogs::table.filter(dogs::dog_id.eq(dog_id)))
        .set((
            dogs::adoption_status.eq(dog.adoption_status.as_str()),
            dogs::owner_adoptee_id.eq(dog.owner_id),
            dogs::modified.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("Dog {dog_id} not found")));
    }
    Ok(())
}

/// Writes a dog's health-relevant columns after a health transition.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_dog_health(
    conn: &mut SqliteConnection,
    dog: &Dog,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let dog_id: i64 = dog.dog_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("Dog has no persisted id"))
    })?;

    let (passing_date, passing_reason, burial_place) = match &dog.passing {
        Some(p) => (
            Some(format_timestamp(p.passing_date)?),
            Some(p.passing_reason.clone()),
            Some(p.burial_place.clone()),
        ),
        None => (None, None, None),
    };

    let rows: usize = diesel::update(dogs::table.filter(dogs::dog_id.eq(dog_id)))
        .set((
            dogs::health_status.eq(dog.health_status.as_str()),
            dogs::adoption_status.eq(dog.adoption_status.as_str()),
            dogs::passing_date.eq(passing_date),
            dogs::passing_reason.eq(passing_reason),
            dogs::burial_place.eq(burial_place),
            dogs::modified.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("Dog {dog_id} not found")));
    }
    Ok(())
}

/// Deletes a dog. Weight, photo, document and adoption records follow by
/// cascade; audit events keep their rows with the dog reference cleared.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_dog(conn: &mut SqliteConnection, dog_id: i64) -> Result<(), PersistenceError> {
    let rows: usize =
        diesel::delete(dogs::table.filter(dogs::dog_id.eq(dog_id))).execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("Dog {dog_id} not found")));
    }
    info!(dog_id, "Deleted dog");
    Ok(())
}
