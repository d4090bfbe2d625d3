// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event reads.

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven_audit::AuditEvent;

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist, or a
/// `SerializationError` if its payloads no longer deserialize.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first(conn)?;
    let (_, event) = row.into_domain()?;
    Ok(event)
}

/// Retrieves the audit trail for a dog, oldest event first.
///
/// # Errors
///
/// Returns an error if the query fails or an event does not deserialize.
pub fn audit_trail_for_dog(
    conn: &mut SqliteConnection,
    dog_id: i64,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::dog_id.eq(dog_id))
        .order(audit_events::event_id.asc())
        .load(conn)?;
    rows.into_iter().map(AuditEventRow::into_domain).collect()
}
