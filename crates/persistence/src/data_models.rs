// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored rows and domain values.
//!
//! Timestamps cross the boundary as RFC 3339 text; status enums as their
//! snake_case string forms. A stored value that no longer parses is a
//! `ReconstructionError`, never a panic.

use crate::diesel_schema::{
    adoption_records, dog_document_records, dog_photo_records, dog_weight_records, dogs,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use pawhaven_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use pawhaven_domain::{
    AdoptionRecord, Adoptee, Contact, Dog, DogDocumentRecord, DogPhotoRecord, DogWeightRecord,
    DomainError, EntityInfo, PassingInfo,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be rendered as RFC 3339.
pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns a `ReconstructionError` if the stored value is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("invalid timestamp '{value}': {e}"))
    })
}

/// Parses a stored status string into its domain enum.
///
/// # Errors
///
/// Returns a `ReconstructionError` if the stored value is not a member of
/// the enum.
pub fn parse_choice<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|e: DomainError| PersistenceError::ReconstructionError(e.to_string()))
}

// ============================================================================
// Audit serialization
// ============================================================================

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

// ============================================================================
// Party rows
// ============================================================================

/// A stored `entity_info` row.
#[derive(Debug, Clone, Queryable)]
pub struct EntityInfoRow {
    pub entity_info_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl EntityInfoRow {
    /// Maps the row to its domain value, keeping stored casing.
    #[must_use]
    pub fn into_domain(self) -> EntityInfo {
        EntityInfo::with_id(
            self.entity_info_id,
            self.name,
            self.email,
            self.phone,
            self.address,
        )
    }
}

/// A stored `contacts` row. The entity info is loaded by join.
#[derive(Debug, Clone, Queryable)]
pub struct ContactRow {
    pub contact_id: i64,
    pub entity_info_id: i64,
    pub notes: String,
    pub created: String,
    pub modified: String,
}

impl ContactRow {
    /// Maps the row plus its joined entity info to a domain `Contact`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if a stored timestamp does not
    /// parse.
    pub fn into_domain(self, entity_info: EntityInfo) -> Result<Contact, PersistenceError> {
        Ok(Contact::with_id(
            self.contact_id,
            entity_info,
            self.notes,
            parse_timestamp(&self.created)?,
            parse_timestamp(&self.modified)?,
        ))
    }
}

/// A stored `adoptees` row. Contact and entity info are loaded by join.
#[derive(Debug, Clone, Queryable)]
pub struct AdopteeRow {
    pub adoptee_id: i64,
    pub contact_id: i64,
    pub charter_id: i64,
    pub adoption_status: String,
}

impl AdopteeRow {
    /// Maps the row plus its joined contact to a domain `Adoptee`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the stored status does not
    /// parse.
    pub fn into_domain(self, contact: Contact) -> Result<Adoptee, PersistenceError> {
        Ok(Adoptee::with_id(
            self.adoptee_id,
            contact,
            self.charter_id,
            parse_choice(&self.adoption_status)?,
        ))
    }
}

// ============================================================================
// Dog rows
// ============================================================================

/// A stored `dogs` row, in table column order.
#[derive(Debug, Clone, Queryable)]
pub struct DogRow {
    pub dog_id: i64,
    pub charter_id: i64,
    pub owner_adoptee_id: Option<i64>,
    pub name: String,
    pub age_months: i32,
    pub gender: String,
    pub breed: String,
    pub color: String,
    pub intake_reason: String,
    pub arrival_date: String,
    pub microchip_status: String,
    pub microchip_id: Option<String>,
    pub current_weight_kg: Option<f64>,
    pub height_cm: f64,
    pub detailed_description: String,
    pub health_status: String,
    pub vaccination_status: String,
    pub castration_status: String,
    pub adoption_status: String,
    pub passing_date: Option<String>,
    pub passing_reason: Option<String>,
    pub burial_place: Option<String>,
    pub health_record: String,
    pub vaccination_record: String,
    pub treatment_record: String,
    pub special_needs: String,
    pub behavioral_notes: String,
    pub other_notes: String,
    pub created: String,
    pub modified: String,
}

impl DogRow {
    /// Maps the row to a domain `Dog`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if a stored status or timestamp
    /// does not parse, or if passing fields are partially present.
    pub fn into_domain(self) -> Result<Dog, PersistenceError> {
        let passing: Option<PassingInfo> =
            match (self.passing_date, self.passing_reason, self.burial_place) {
                (Some(date), Some(reason), Some(place)) => Some(
                    PassingInfo::new(parse_timestamp(&date)?, reason, place)
                        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
                ),
                (None, None, None) => None,
                _ => {
                    return Err(PersistenceError::ReconstructionError(format!(
                        "dog {} has partial passing fields",
                        self.dog_id
                    )));
                }
            };

        Ok(Dog {
            dog_id: Some(self.dog_id),
            charter_id: self.charter_id,
            name: self.name,
            age_months: self.age_months,
            gender: parse_choice(&self.gender)?,
            breed: parse_choice(&self.breed)?,
            color: parse_choice(&self.color)?,
            intake_reason: parse_choice(&self.intake_reason)?,
            arrival_date: parse_timestamp(&self.arrival_date)?,
            microchip_status: parse_choice(&self.microchip_status)?,
            microchip_id: self.microchip_id,
            current_weight_kg: self.current_weight_kg,
            height_cm: self.height_cm,
            detailed_description: self.detailed_description,
            health_status: parse_choice(&self.health_status)?,
            vaccination_status: parse_choice(&self.vaccination_status)?,
            castration_status: parse_choice(&self.castration_status)?,
            adoption_status: parse_choice(&self.adoption_status)?,
            owner_id: self.owner_adoptee_id,
            passing,
            health_record: self.health_record,
            vaccination_record: self.vaccination_record,
            treatment_record: self.treatment_record,
            special_needs: self.special_needs,
            behavioral_notes: self.behavioral_notes,
            other_notes: self.other_notes,
        })
    }
}

/// Insertable `dogs` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = dogs)]
pub struct NewDogRow {
    pub charter_id: i64,
    pub owner_adoptee_id: Option<i64>,
    pub name: String,
    pub age_months: i32,
    pub gender: String,
    pub breed: String,
    pub color: String,
    pub intake_reason: String,
    pub arrival_date: String,
    pub microchip_status: String,
    pub microchip_id: Option<String>,
    pub current_weight_kg: Option<f64>,
    pub height_cm: f64,
    pub detailed_description: String,
    pub health_status: String,
    pub vaccination_status: String,
    pub castration_status: String,
    pub adoption_status: String,
    pub passing_date: Option<String>,
    pub passing_reason: Option<String>,
    pub burial_place: Option<String>,
    pub health_record: String,
    pub vaccination_record: String,
    pub treatment_record: String,
    pub special_needs: String,
    pub behavioral_notes: String,
    pub other_notes: String,
    pub created: String,
    pub modified: String,
}

impl NewDogRow {
    /// Builds an insertable row from a domain `Dog`.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_domain(dog: &Dog, now: OffsetDateTime) -> Result<Self, PersistenceError> {
        let now_str: String = format_timestamp(now)?;
        let (passing_date, passing_reason, burial_place) = match &dog.passing {
            Some(p) => (
                Some(format_timestamp(p.passing_date)?),
                Some(p.passing_reason.clone()),
                Some(p.burial_place.clone()),
            ),
            None => (None, None, None),
        };

        Ok(Self {
            charter_id: dog.charter_id,
            owner_adoptee_id: dog.owner_id,
            name: dog.name.clone(),
            age_months: dog.age_months,
            gender: dog.gender.as_str().to_string(),
            breed: dog.breed.as_str().to_string(),
            color: dog.color.as_str().to_string(),
            intake_reason: dog.intake_reason.as_str().to_string(),
            arrival_date: format_timestamp(dog.arrival_date)?,
            microchip_status: dog.microchip_status.as_str().to_string(),
            microchip_id: dog.microchip_id.clone(),
            current_weight_kg: dog.current_weight_kg,
            height_cm: dog.height_cm,
            detailed_description: dog.detailed_description.clone(),
            health_status: dog.health_status.as_str().to_string(),
            vaccination_status: dog.vaccination_status.as_str().to_string(),
            castration_status: dog.castration_status.as_str().to_string(),
            adoption_status: dog.adoption_status.as_str().to_string(),
            passing_date,
            passing_reason,
            burial_place,
            health_record: dog.health_record.clone(),
            vaccination_record: dog.vaccination_record.clone(),
            treatment_record: dog.treatment_record.clone(),
            special_needs: dog.special_needs.clone(),
            behavioral_notes: dog.behavioral_notes.clone(),
            other_notes: dog.other_notes.clone(),
            created: now_str.clone(),
            modified: now_str,
        })
    }
}

/// A stored `dog_weight_records` row.
#[derive(Debug, Clone, Queryable)]
pub struct WeightRecordRow {
    pub weight_record_id: i64,
    pub dog_id: i64,
    pub record_date: String,
    pub weight_kg: f64,
}

impl WeightRecordRow {
    /// Maps the row to a domain `DogWeightRecord`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the stored date does not parse.
    pub fn into_domain(self) -> Result<DogWeightRecord, PersistenceError> {
        Ok(DogWeightRecord::with_id(
            self.weight_record_id,
            self.dog_id,
            parse_timestamp(&self.record_date)?,
            self.weight_kg,
        ))
    }
}

/// Insertable `dog_weight_records` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = dog_weight_records)]
pub struct NewWeightRecordRow {
    pub dog_id: i64,
    pub record_date: String,
    pub weight_kg: f64,
}

/// A stored `dog_photo_records` row.
#[derive(Debug, Clone, Queryable)]
pub struct PhotoRecordRow {
    pub photo_record_id: i64,
    pub dog_id: i64,
    pub name: String,
    pub photo_path: Option<String>,
    pub is_profile_photo: i32,
    pub uploaded: String,
}

impl PhotoRecordRow {
    /// Maps the row to a domain `DogPhotoRecord`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the stored date does not parse.
    pub fn into_domain(self) -> Result<DogPhotoRecord, PersistenceError> {
        Ok(DogPhotoRecord::with_id(
            self.photo_record_id,
            self.dog_id,
            self.name,
            self.photo_path,
            self.is_profile_photo != 0,
            parse_timestamp(&self.uploaded)?,
        ))
    }
}

/// Insertable `dog_photo_records` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = dog_photo_records)]
pub struct NewPhotoRecordRow {
    pub dog_id: i64,
    pub name: String,
    pub photo_path: Option<String>,
    pub is_profile_photo: i32,
    pub uploaded: String,
}

/// A stored `dog_document_records` row.
#[derive(Debug, Clone, Queryable)]
pub struct DocumentRecordRow {
    pub document_record_id: i64,
    pub dog_id: i64,
    pub title: String,
    pub document_path: String,
    pub document_type: String,
    pub description: String,
    pub uploaded: String,
}

impl DocumentRecordRow {
    /// Maps the row to a domain `DogDocumentRecord`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the stored date does not parse.
    pub fn into_domain(self) -> Result<DogDocumentRecord, PersistenceError> {
        Ok(DogDocumentRecord::with_id(
            self.document_record_id,
            self.dog_id,
            self.title,
            self.document_path,
            self.document_type,
            self.description,
            parse_timestamp(&self.uploaded)?,
        ))
    }
}

/// Insertable `dog_document_records` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = dog_document_records)]
pub struct NewDocumentRecordRow {
    pub dog_id: i64,
    pub title: String,
    pub document_path: String,
    pub document_type: String,
    pub description: String,
    pub uploaded: String,
}

// ============================================================================
// Adoption rows
// ============================================================================

/// A stored `adoption_records` row.
#[derive(Debug, Clone, Queryable)]
pub struct AdoptionRecordRow {
    pub adoption_record_id: i64,
    pub dog_id: i64,
    pub adoptee_id: i64,
    pub charter_id: i64,
    pub result: String,
    pub is_active: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: String,
    pub created: String,
    pub modified: String,
}

impl AdoptionRecordRow {
    /// Maps the row to a domain `AdoptionRecord`.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if a stored value does not parse.
    pub fn into_domain(self) -> Result<AdoptionRecord, PersistenceError> {
        let start_date: Option<OffsetDateTime> = match self.start_date {
            Some(s) => Some(parse_timestamp(&s)?),
            None => None,
        };
        let end_date: Option<OffsetDateTime> = match self.end_date {
            Some(s) => Some(parse_timestamp(&s)?),
            None => None,
        };

        Ok(AdoptionRecord {
            adoption_record_id: Some(self.adoption_record_id),
            dog_id: self.dog_id,
            adoptee_id: self.adoptee_id,
            charter_id: self.charter_id,
            result: parse_choice(&self.result)?,
            is_active: self.is_active != 0,
            start_date,
            end_date,
            notes: self.notes,
        })
    }
}

/// Insertable `adoption_records` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = adoption_records)]
pub struct NewAdoptionRecordRow {
    pub dog_id: i64,
    pub adoptee_id: i64,
    pub charter_id: i64,
    pub result: String,
    pub is_active: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: String,
    pub created: String,
    pub modified: String,
}

impl NewAdoptionRecordRow {
    /// Builds an insertable row from a domain `AdoptionRecord`.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_domain(
        record: &AdoptionRecord,
        now: OffsetDateTime,
    ) -> Result<Self, PersistenceError> {
        let now_str: String = format_timestamp(now)?;
        Ok(Self {
            dog_id: record.dog_id,
            adoptee_id: record.adoptee_id,
            charter_id: record.charter_id,
            result: record.result.as_str().to_string(),
            is_active: i32::from(record.is_active),
            start_date: match record.start_date {
                Some(ts) => Some(format_timestamp(ts)?),
                None => None,
            },
            end_date: match record.end_date {
                Some(ts) => Some(format_timestamp(ts)?),
                None => None,
            },
            notes: record.notes.clone(),
            created: now_str.clone(),
            modified: now_str,
        })
    }
}

// ============================================================================
// Audit rows
// ============================================================================

/// A stored `audit_events` row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub charter_id: Option<i64>,
    pub dog_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl AuditEventRow {
    /// Maps the row back to a domain `AuditEvent` plus its event id.
    ///
    /// # Errors
    ///
    /// Returns a `SerializationError` if a stored JSON payload does not
    /// deserialize.
    pub fn into_domain(self) -> Result<(i64, AuditEvent), PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok((
            self.event_id,
            AuditEvent::new(
                actor.into(),
                cause.into(),
                action.into(),
                before.into(),
                after.into(),
                self.charter_id,
                self.dog_id,
            ),
        ))
    }
}
