// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived cross-entity statistics.
//!
//! Pure read-only views consumed by dashboards and summaries. Nothing
//! here mutates state.

use crate::diesel_schema::{adoptees, adoption_records, charters, dogs, entity_info};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use pawhaven_domain::{AdoptionStatus, HealthStatus};

/// Global shelter statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelterStats {
    pub total_dogs: i64,
    pub adopted_dogs: i64,
    pub available_dogs: i64,
    pub in_trial_dogs: i64,
    pub unfit_dogs: i64,
    pub healthy_dogs: i64,
    pub sick_dogs: i64,
    pub passed_away_dogs: i64,
    pub unspecified_health_dogs: i64,
    pub active_processes: i64,
    pub total_adoptees: i64,
    pub total_charters: i64,
}

/// Per-charter summary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharterSummary {
    pub charter_id: i64,
    pub name: String,
    pub dog_count: i64,
    pub adopted_count: i64,
    pub owned_dogs: i64,
    pub unowned_dogs: i64,
}

fn count_dogs_by_adoption_status(
    conn: &mut SqliteConnection,
    status: AdoptionStatus,
) -> Result<i64, PersistenceError> {
    Ok(dogs::table
        .filter(dogs::adoption_status.eq(status.as_str()))
        .count()
        .get_result(conn)?)
}

fn count_dogs_by_health_status(
    conn: &mut SqliteConnection,
    status: HealthStatus,
) -> Result<i64, PersistenceError> {
    Ok(dogs::table
        .filter(dogs::health_status.eq(status.as_str()))
        .count()
        .get_result(conn)?)
}

/// Computes global shelter statistics.
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn shelter_stats(conn: &mut SqliteConnection) -> Result<ShelterStats, PersistenceError> {
    Ok(ShelterStats {
        total_dogs: dogs::table.count().get_result(conn)?,
        adopted_dogs: count_dogs_by_adoption_status(conn, AdoptionStatus::Adopted)?,
        available_dogs: count_dogs_by_adoption_status(conn, AdoptionStatus::Fit)?,
        in_trial_dogs: count_dogs_by_adoption_status(conn, AdoptionStatus::Trial)?,
        unfit_dogs: count_dogs_by_adoption_status(conn, AdoptionStatus::Unfit)?,
        healthy_dogs: count_dogs_by_health_status(conn, HealthStatus::Healthy)?,
        sick_dogs: count_dogs_by_health_status(conn, HealthStatus::Sick)?,
        passed_away_dogs: count_dogs_by_health_status(conn, HealthStatus::PassedAway)?,
        unspecified_health_dogs: count_dogs_by_health_status(conn, HealthStatus::Unspecified)?,
        active_processes: adoption_records::table
            .filter(adoption_records::is_active.eq(1))
            .count()
            .get_result(conn)?,
        total_adoptees: adoptees::table.count().get_result(conn)?,
        total_charters: charters::table.count().get_result(conn)?,
    })
}

/// Computes per-charter summaries.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn charter_summaries(
    conn: &mut SqliteConnection,
) -> Result<Vec<CharterSummary>, PersistenceError> {
    let charter_rows: Vec<(i64, String)> = charters::table
        .inner_join(entity_info::table)
        .select((charters::charter_id, entity_info::name))
        .order(entity_info::name.asc())
        .load(conn)?;

    let mut summaries: Vec<CharterSummary> = Vec::with_capacity(charter_rows.len());
    for (charter_id, name) in charter_rows {
        let dog_count: i64 = dogs::table
            .filter(dogs::charter_id.eq(charter_id))
            .count()
            .get_result(conn)?;
        let adopted_count: i64 = dogs::table
            .filter(dogs::charter_id.eq(charter_id))
            .filter(dogs::adoption_status.eq(AdoptionStatus::Adopted.as_str()))
            .count()
            .get_result(conn)?;
        let owned_dogs: i64 = dogs::table
            .filter(dogs::charter_id.eq(charter_id))
            .filter(dogs::owner_adoptee_id.is_not_null())
            .count()
            .get_result(conn)?;

        summaries.push(CharterSummary {
            charter_id,
            name,
            dog_count,
            adopted_count,
            owned_dogs,
            unowned_dogs: dog_count - owned_dogs,
        });
    }

    Ok(summaries)
}
