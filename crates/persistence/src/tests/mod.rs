// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod lifecycle_tests;
mod party_tests;

use crate::Persistence;
use pawhaven_audit::{Actor, Cause};
use pawhaven_domain::{
    AdoptionStatus, Adoptee, Charter, Dog, DogBreed, DogColor, DogGender, DogIntake,
    HealthStatus, IntakeReason, PassingInfo, TripleChoice, VaccinationStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("caretaker-7"), String::from("caretaker"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Caretaker request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-02-14 10:30 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-02-20 16:45 UTC)
}

pub fn test_passing() -> PassingInfo {
    PassingInfo::new(
        later(),
        String::from("Sudden illness"),
        String::from("Shelter garden"),
    )
    .unwrap()
}

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn seed_charter(persistence: &mut Persistence, name: &str) -> Charter {
    persistence
        .register_charter(
            name,
            Some(format!("{}@example.org", name.replace(' ', "."))),
            None,
            None,
            None,
        )
        .expect("charter registration")
}

pub fn seed_adoptee(persistence: &mut Persistence, charter_id: i64, name: &str) -> Adoptee {
    persistence
        .register_adoptee(
            name,
            Some(format!("{}@example.com", name.replace(' ', "."))),
            None,
            None,
            "",
            charter_id,
            test_now(),
        )
        .expect("adoptee registration")
}

pub fn base_intake(name: &str) -> DogIntake {
    DogIntake {
        name: name.to_string(),
        age_months: 24,
        gender: DogGender::Female,
        breed: DogBreed::StreetDog,
        color: DogColor::Tan,
        intake_reason: IntakeReason::Rescue,
        arrival_date: datetime!(2026-01-05 08:00 UTC),
        microchip_status: TripleChoice::No,
        microchip_id: None,
        initial_weight_kg: None,
        height_cm: 45.0,
        detailed_description: String::new(),
        health_status: HealthStatus::Healthy,
        vaccination_status: VaccinationStatus::Complete,
        castration_status: TripleChoice::Yes,
        adoption_status: AdoptionStatus::Fit,
        owner_id: None,
        special_needs: String::new(),
        behavioral_notes: String::new(),
        other_notes: String::new(),
    }
}

pub fn seed_dog(persistence: &mut Persistence, charter_id: i64, name: &str) -> Dog {
    persistence
        .register_dog(charter_id, base_intake(name), test_now())
        .expect("dog registration")
}
