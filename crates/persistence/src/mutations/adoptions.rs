// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orchestration of staged lifecycle transitions.
//!
//! The engine stages a transition as plain values; the functions here
//! write every staged entity plus the audit event. They must run inside
//! one transaction so that all writes commit together or none do.

use crate::data_models::{NewAdoptionRecordRow, format_timestamp};
use crate::diesel_schema::adoption_records;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::dogs::{update_dog_adoption, update_dog_health};
use crate::mutations::parties::{touch_contact, update_adoptee_status};
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven::{AdoptionTransition, HealthTransition};
use pawhaven_domain::AdoptionRecord;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Inserts a new adoption record, returning its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_adoption_record(
    conn: &mut SqliteConnection,
    record: &AdoptionRecord,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let row: NewAdoptionRecordRow = NewAdoptionRecordRow::from_domain(record, now)?;
    diesel::insert_into(adoption_records::table)
        .values(&row)
        .execute(conn)?;
    crate::backend::sqlite::get_last_insert_rowid(conn)
}

/// Writes an existing adoption record's lifecycle columns.
///
/// # Errors
///
/// Returns an error if the update fails or the record has no id.
pub fn update_adoption_record(
    conn: &mut SqliteConnection,
    record: &AdoptionRecord,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let record_id: i64 = record.adoption_record_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("Adoption record has no persisted id"))
    })?;

    let start_date: Option<String> = match record.start_date {
        Some(ts) => Some(format_timestamp(ts)?),
        None => None,
    };
    let end_date: Option<String> = match record.end_date {
        Some(ts) => Some(format_timestamp(ts)?),
        None => None,
    };

    let rows: usize = diesel::update(
        adoption_records::table.filter(adoption_records::adoption_record_id.eq(record_id)),
    )
    .set((
        adoption_records::result.eq(record.result.as_str()),
        adoption_records::is_active.eq(i32::from(record.is_active)),
        adoption_records::start_date.eq(start_date),
        adoption_records::end_date.eq(end_date),
        adoption_records::notes.eq(&record.notes),
        adoption_records::modified.eq(format_timestamp(now)?),
    ))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Adoption record {record_id} not found"
        )));
    }
    Ok(())
}

/// Persists a staged adoption transition: the record, the dog, the
/// adoptee and the audit event.
///
/// Must run inside the transaction that read the transition's
/// preconditions. Returns the record ID (generated for opens, existing
/// for resolutions).
///
/// # Errors
///
/// Returns an error if any write fails; the caller's transaction then
/// rolls everything back.
pub fn persist_adoption_transition(
    conn: &mut SqliteConnection,
    transition: &AdoptionTransition,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let record_id: i64 = match transition.record.adoption_record_id {
        Some(record_id) => {
            update_adoption_record(conn, &transition.record, now)?;
            record_id
        }
        None => insert_adoption_record(conn, &transition.record, now)?,
    };
    debug!(record_id, "Persisted adoption record");

    update_dog_adoption(conn, &transition.dog, now)?;
    update_adoptee_status(
        conn,
        transition.record.adoptee_id,
        transition.adoptee.adoption_status,
    )?;
    if let Some(contact_id) = transition.adoptee.contact.contact_id() {
        touch_contact(conn, contact_id, now)?;
    }

    let event_id: i64 = persist_audit_event(conn, &transition.audit_event, now)?;

    info!(
        record_id,
        event_id,
        dog_id = transition.record.dog_id,
        adoptee_id = transition.record.adoptee_id,
        action = %transition.audit_event.action.name,
        "Persisted adoption transition"
    );
    Ok(record_id)
}

/// Persists a staged health transition: the dog, every force-closed
/// process with its released adoptee, and the audit event.
///
/// Must run inside one transaction with the reads that staged it.
///
/// # Errors
///
/// Returns an error if any write fails; the caller's transaction then
/// rolls everything back.
pub fn persist_health_transition(
    conn: &mut SqliteConnection,
    transition: &HealthTransition,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    update_dog_health(conn, &transition.dog, now)?;

    for closed in &transition.closed {
        update_adoption_record(conn, &closed.record, now)?;
        update_adoptee_status(
            conn,
            closed.record.adoptee_id,
            closed.adoptee.adoption_status,
        )?;
        if let Some(contact_id) = closed.adoptee.contact.contact_id() {
            touch_contact(conn, contact_id, now)?;
        }
        debug!(
            record_id = closed.record.adoption_record_id,
            adoptee_id = closed.record.adoptee_id,
            "Force-closed adoption process"
        );
    }

    let event_id: i64 = persist_audit_event(conn, &transition.audit_event, now)?;

    info!(
        event_id,
        dog_id = transition.dog.dog_id,
        closed = transition.closed.len(),
        "Persisted health transition"
    );
    Ok(event_id)
}
