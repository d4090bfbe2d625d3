// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the PawHaven shelter records system.
//!
//! This crate provides database persistence for the entity directory,
//! the party and dog registries, the adoption lifecycle and its audit
//! trail. It is built on Diesel with the `SQLite` backend.
//!
//! ## Transactional boundary
//!
//! Every lifecycle operation (`open_adoption`, `resolve_adoption`,
//! `update_health`) runs as one immediate transaction:
//!
//! 1. Load the entities involved
//! 2. Read the per-dog uniqueness facts (active/approved records)
//! 3. Apply the pure engine transition from the `pawhaven` crate
//! 4. Persist the staged record, dog, adoptee and audit event
//!
//! The facts are read inside the same transaction that commits the
//! writes, so the "at most one active process per dog" check cannot race
//! a concurrent open. A failed step rolls the whole transaction back;
//! partial writes are never observable.
//!
//! ## Testing
//!
//! Standard tests run against unique in-memory `SQLite` databases
//! (atomic-counter names, no time-based collisions). Foreign key
//! enforcement is verified at startup.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::error;

use pawhaven::{AdoptionFacts, Command, ForceCloseStatuses};
use pawhaven_audit::{Actor, AuditEvent, Cause};
use pawhaven_domain::{
    AdoptionRecord, AdoptionResult, Adoptee, Charter, Contact, Dog, DogDocumentRecord,
    DogIntake, DogPhotoRecord, DogWeightRecord, DomainError, EntityInfo, HealthStatus,
    PassingInfo, resolve_display_photo,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::reports::{CharterSummary, ShelterStats};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the shelter records system.
///
/// Single-writer by construction: the adapter owns one `SQLite`
/// connection and every mutation runs through it synchronously.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Entity directory & party registry
    // ========================================================================

    /// Registers a charter with its identity record.
    ///
    /// The name is normalized to title case; name/email/phone uniqueness
    /// is checked inside the transaction.
    ///
    /// # Errors
    ///
    /// Returns `MissingContactMethod` or `DuplicateIdentity` on an
    /// identity rule violation.
    pub fn register_charter(
        &mut self,
        name: &str,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        default_photo_path: Option<String>,
    ) -> Result<Charter, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let entity: EntityInfo = EntityInfo::new(name, email, phone, address);
            let entity_info_id: i64 = mutations::parties::register_entity_info(conn, &entity)?;
            let charter_id: i64 =
                mutations::parties::insert_charter(conn, entity_info_id, default_photo_path.as_deref())?;
            queries::parties::get_charter(conn, charter_id)
        })
    }

    /// Registers a contact with its identity record, stamping
    /// created/modified.
    ///
    /// # Errors
    ///
    /// Returns `MissingContactMethod` or `DuplicateIdentity` on an
    /// identity rule violation.
    pub fn register_contact(
        &mut self,
        name: &str,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        notes: &str,
        now: OffsetDateTime,
    ) -> Result<Contact, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let entity: EntityInfo = EntityInfo::new(name, email, phone, address);
            let entity_info_id: i64 = mutations::parties::register_entity_info(conn, &entity)?;
            let contact_id: i64 =
                mutations::parties::insert_contact(conn, entity_info_id, notes, now)?;
            queries::parties::get_contact(conn, contact_id)
        })
    }

    /// Registers an adoptee: a contact specialized with a charter scope
    /// and an initial `Fit` adoption status.
    ///
    /// # Errors
    ///
    /// Returns an identity rule violation, or `NotFound` if the charter
    /// does not exist.
    pub fn register_adoptee(
        &mut self,
        name: &str,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        notes: &str,
        charter_id: i64,
        now: OffsetDateTime,
    ) -> Result<Adoptee, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            // The charter scope must exist.
            queries::parties::get_charter(conn, charter_id)?;

            let entity: EntityInfo = EntityInfo::new(name, email, phone, address);
            let entity_info_id: i64 = mutations::parties::register_entity_info(conn, &entity)?;
            let contact_id: i64 =
                mutations::parties::insert_contact(conn, entity_info_id, notes, now)?;
            let adoptee_id: i64 = mutations::parties::insert_adoptee(
                conn,
                contact_id,
                charter_id,
                pawhaven_domain::AdoptionStatus::Fit,
            )?;
            queries::parties::get_adoptee(conn, adoptee_id)
        })
    }

    /// Saves a correction edit to an entity's identity record,
    /// re-validating uniqueness (excluding the entity itself) before
    /// persisting.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentity`/`MissingContactMethod` on a rule
    /// violation, or `NotFound` for an unpersisted entity.
    pub fn update_entity(&mut self, entity: &EntityInfo) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::parties::update_entity_info(conn, entity))
    }

    /// Loads a charter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the charter does not exist.
    pub fn get_charter(&mut self, charter_id: i64) -> Result<Charter, PersistenceError> {
        queries::parties::get_charter(&mut self.conn, charter_id)
    }

    /// Loads a contact.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contact does not exist.
    pub fn get_contact(&mut self, contact_id: i64) -> Result<Contact, PersistenceError> {
        queries::parties::get_contact(&mut self.conn, contact_id)
    }

    /// Loads an adoptee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the adoptee does not exist.
    pub fn get_adoptee(&mut self, adoptee_id: i64) -> Result<Adoptee, PersistenceError> {
        queries::parties::get_adoptee(&mut self.conn, adoptee_id)
    }

    /// Deletes a charter, blocked while dogs or adoptees reference it.
    ///
    /// # Errors
    ///
    /// Returns `ReferentialIntegrity` when live references exist.
    pub fn delete_charter(&mut self, charter_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::parties::delete_charter(conn, charter_id))
    }

    /// Deletes a contact, blocked while an adoptee extension references
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `ReferentialIntegrity` when live references exist.
    pub fn delete_contact(&mut self, contact_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::parties::delete_contact(conn, contact_id))
    }

    /// Deletes an adoptee, blocked while owned dogs or adoption history
    /// reference it.
    ///
    /// # Errors
    ///
    /// Returns `ReferentialIntegrity` when live references exist.
    pub fn delete_adoptee(&mut self, adoptee_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::parties::delete_adoptee(conn, adoptee_id))
    }

    // ========================================================================
    // Dog registry
    // ========================================================================

    /// Registers a dog for a charter.
    ///
    /// The name is title-cased, invariants are validated, and a supplied
    /// initial weight becomes the first weight history entry.
    ///
    /// # Errors
    ///
    /// Returns a domain error if an invariant fails, or `NotFound` if
    /// the charter does not exist.
    pub fn register_dog(
        &mut self,
        charter_id: i64,
        intake: DogIntake,
        now: OffsetDateTime,
    ) -> Result<Dog, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            queries::parties::get_charter(conn, charter_id)?;

            let dog: Dog = Dog::register(charter_id, intake);
            let dog_id: i64 = mutations::dogs::insert_dog(conn, &dog, now)?;
            queries::dogs::get_dog(conn, dog_id)
        })
    }

    /// Loads a dog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dog does not exist.
    pub fn get_dog(&mut self, dog_id: i64) -> Result<Dog, PersistenceError> {
        queries::dogs::get_dog(&mut self.conn, dog_id)
    }

    /// Loads the dogs housed by a charter, newest intake first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn dogs_of_charter(&mut self, charter_id: i64) -> Result<Vec<Dog>, PersistenceError> {
        queries::dogs::dogs_for_charter(&mut self.conn, charter_id)
    }

    /// Loads the dogs owned by an adoptee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn adopted_dogs(&mut self, adoptee_id: i64) -> Result<Vec<Dog>, PersistenceError> {
        queries::dogs::dogs_owned_by(&mut self.conn, adoptee_id)
    }

    /// Records a weight entry for a dog and writes the value through to
    /// `current_weight_kg` (newest wins).
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` if the weight is not strictly positive,
    /// or `NotFound` if the dog does not exist.
    pub fn record_weight(
        &mut self,
        dog_id: i64,
        weight_kg: f64,
        at: OffsetDateTime,
    ) -> Result<DogWeightRecord, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            queries::dogs::get_dog(conn, dog_id)?;

            let record: DogWeightRecord = DogWeightRecord::new(dog_id, at, weight_kg)?;
            let weight_record_id: i64 = mutations::dogs::insert_weight_record(conn, &record, at)?;
            Ok(DogWeightRecord::with_id(
                weight_record_id,
                dog_id,
                at,
                weight_kg,
            ))
        })
    }

    /// Loads a dog's weight history, newest entry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn weight_history(
        &mut self,
        dog_id: i64,
    ) -> Result<Vec<DogWeightRecord>, PersistenceError> {
        queries::dogs::weight_history(&mut self.conn, dog_id)
    }

    /// Attaches a photo to a dog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dog does not exist.
    pub fn attach_photo(
        &mut self,
        dog_id: i64,
        name: &str,
        photo_path: Option<String>,
        is_profile_photo: bool,
        at: OffsetDateTime,
    ) -> Result<DogPhotoRecord, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            queries::dogs::get_dog(conn, dog_id)?;

            let record: DogPhotoRecord = DogPhotoRecord::new(
                dog_id,
                name.to_string(),
                photo_path,
                is_profile_photo,
                at,
            );
            let photo_record_id: i64 = mutations::dogs::insert_photo_record(conn, &record)?;
            Ok(DogPhotoRecord::with_id(
                photo_record_id,
                dog_id,
                record.name,
                record.photo_path,
                record.is_profile_photo,
                at,
            ))
        })
    }

    /// Attaches a document to a dog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dog does not exist.
    pub fn attach_document(
        &mut self,
        dog_id: i64,
        title: &str,
        document_path: &str,
        document_type: &str,
        description: &str,
        at: OffsetDateTime,
    ) -> Result<DogDocumentRecord, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            queries::dogs::get_dog(conn, dog_id)?;

            let record: DogDocumentRecord = DogDocumentRecord::new(
                dog_id,
                title.to_string(),
                document_path.to_string(),
                document_type.to_string(),
                description.to_string(),
                at,
            );
            let document_record_id: i64 =
                mutations::dogs::insert_document_record(conn, &record)?;
            Ok(DogDocumentRecord::with_id(
                document_record_id,
                dog_id,
                record.title,
                record.document_path,
                record.document_type,
                record.description,
                at,
            ))
        })
    }

    /// Loads a dog's photos, profile photo first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn photos(&mut self, dog_id: i64) -> Result<Vec<DogPhotoRecord>, PersistenceError> {
        queries::dogs::photos_for_dog(&mut self.conn, dog_id)
    }

    /// Loads a dog's documents, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn documents(
        &mut self,
        dog_id: i64,
    ) -> Result<Vec<DogDocumentRecord>, PersistenceError> {
        queries::dogs::documents_for_dog(&mut self.conn, dog_id)
    }

    /// Resolves the best available display photo path for a dog.
    ///
    /// Priority: profile photo, first attached photo, the charter's
    /// default photo, the static placeholder.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dog does not exist.
    pub fn display_photo(&mut self, dog_id: i64) -> Result<String, PersistenceError> {
        let dog: Dog = queries::dogs::get_dog(&mut self.conn, dog_id)?;
        let photos: Vec<DogPhotoRecord> = queries::dogs::photos_for_dog(&mut self.conn, dog_id)?;
        let charter: Charter = queries::parties::get_charter(&mut self.conn, dog.charter_id)?;
        Ok(resolve_display_photo(
            &photos,
            charter.default_photo_path.as_deref(),
        ))
    }

    /// Deletes a dog; its weight, photo, document and adoption records
    /// follow by cascade.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dog does not exist.
    pub fn delete_dog(&mut self, dog_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::dogs::delete_dog(conn, dog_id))
    }

    // ========================================================================
    // Adoption lifecycle
    // ========================================================================

    /// Opens an adoption evaluation for a (dog, adoptee) pair.
    ///
    /// Preconditions (no active or approved process on the dog, both
    /// parties eligible) are re-checked inside the transaction that
    /// persists the transition; a concurrent second open is rejected,
    /// never silently superseded.
    ///
    /// # Errors
    ///
    /// Returns `AdoptionIneligible` naming the failed precondition; the
    /// database is left untouched.
    pub fn open_adoption(
        &mut self,
        dog_id: i64,
        adoptee_id: i64,
        notes: &str,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AdoptionRecord, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let dog: Dog = queries::dogs::get_dog(conn, dog_id)?;
            let adoptee: Adoptee = queries::parties::get_adoptee(conn, adoptee_id)?;
            let facts: AdoptionFacts = AdoptionFacts {
                has_active_record: queries::adoptions::has_active_record(conn, dog_id)?,
                has_approved_record: queries::adoptions::has_approved_record(conn, dog_id)?,
            };

            let transition = pawhaven::apply_adoption(
                &dog,
                &adoptee,
                None,
                &facts,
                Command::OpenAdoption {
                    notes: notes.to_string(),
                },
                actor,
                cause,
                now,
            )?;

            let record_id: i64 =
                mutations::adoptions::persist_adoption_transition(conn, &transition, now)?;
            let mut record: AdoptionRecord = transition.record;
            record.adoption_record_id = Some(record_id);
            Ok(record)
        })
    }

    /// Resolves the active adoption process as approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns `ProcessNotActive` for an already-closed record, a domain
    /// error for an invalid resolution, or `NotFound` for a missing
    /// record.
    pub fn resolve_adoption(
        &mut self,
        adoption_record_id: i64,
        result: AdoptionResult,
        notes: Option<String>,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<AdoptionRecord, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let record: AdoptionRecord =
                queries::adoptions::get_record(conn, adoption_record_id)?;
            let dog: Dog = queries::dogs::get_dog(conn, record.dog_id)?;
            let adoptee: Adoptee = queries::parties::get_adoptee(conn, record.adoptee_id)?;
            let facts: AdoptionFacts = AdoptionFacts {
                has_active_record: queries::adoptions::has_active_record(conn, record.dog_id)?,
                has_approved_record: queries::adoptions::has_approved_record(
                    conn,
                    record.dog_id,
                )?,
            };

            let command: Command = match result {
                AdoptionResult::Approved => Command::ApproveAdoption { notes },
                AdoptionResult::Rejected => Command::RejectAdoption { notes },
                AdoptionResult::Evaluation => {
                    return Err(PersistenceError::DomainViolation(
                        DomainError::InvalidChoice {
                            kind: "resolution",
                            value: result.as_str().to_string(),
                        },
                    ));
                }
            };

            let transition = pawhaven::apply_adoption(
                &dog,
                &adoptee,
                Some(&record),
                &facts,
                command,
                actor,
                cause,
                now,
            )?;

            mutations::adoptions::persist_adoption_transition(conn, &transition, now)?;
            Ok(transition.record)
        })
    }

    /// Updates a dog's health status.
    ///
    /// A transition to `PassedAway` requires passing details and
    /// force-closes every active adoption process on the dog, all within
    /// the same transaction. Force-closing with no active processes is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns a domain error on an invariant violation. Failures are
    /// logged; they are fatal to the maintenance operation and roll the
    /// whole transaction back.
    pub fn update_health(
        &mut self,
        dog_id: i64,
        status: HealthStatus,
        passing: Option<PassingInfo>,
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<Dog, PersistenceError> {
        let outcome = self.conn.immediate_transaction(|conn| {
            let dog: Dog = queries::dogs::get_dog(conn, dog_id)?;

            let active_records = queries::adoptions::active_records_for_dog(conn, dog_id)?;
            let mut active_processes: Vec<(AdoptionRecord, Adoptee)> =
                Vec::with_capacity(active_records.len());
            for record in active_records {
                let adoptee: Adoptee = queries::parties::get_adoptee(conn, record.adoptee_id)?;
                active_processes.push((record, adoptee));
            }

            let transition = pawhaven::apply_health_update(
                &dog,
                &active_processes,
                Command::UpdateHealth { status, passing },
                ForceCloseStatuses::default(),
                actor,
                cause,
                now,
            )?;

            mutations::adoptions::persist_health_transition(conn, &transition, now)?;
            Ok(transition.dog)
        });

        if let Err(err) = &outcome {
            error!(dog_id, %err, "Health update failed; transaction rolled back");
        }
        outcome
    }

    /// Loads an adoption record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist.
    pub fn get_adoption_record(
        &mut self,
        adoption_record_id: i64,
    ) -> Result<AdoptionRecord, PersistenceError> {
        queries::adoptions::get_record(&mut self.conn, adoption_record_id)
    }

    /// Loads a dog's full adoption history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn adoption_records_for_dog(
        &mut self,
        dog_id: i64,
    ) -> Result<Vec<AdoptionRecord>, PersistenceError> {
        queries::adoptions::records_for_dog(&mut self.conn, dog_id)
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Computes global shelter statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub fn shelter_stats(&mut self) -> Result<ShelterStats, PersistenceError> {
        queries::reports::shelter_stats(&mut self.conn)
    }

    /// Computes per-charter summaries.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn charter_summaries(&mut self) -> Result<Vec<CharterSummary>, PersistenceError> {
        queries::reports::charter_summaries(&mut self.conn)
    }

    // ========================================================================
    // Audit trail
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit trail for a dog, oldest event first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_trail_for_dog(
        &mut self,
        dog_id: i64,
    ) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::audit::audit_trail_for_dog(&mut self.conn, dog_id)
    }
}
