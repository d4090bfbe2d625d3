// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pawhaven_audit::{Actor, Cause};
use pawhaven_domain::{
    AdoptionRecord, AdoptionStatus, Adoptee, Contact, Dog, DogBreed, DogColor, DogGender,
    DogIntake, EntityInfo, HealthStatus, IntakeReason, TripleChoice, VaccinationStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const TEST_CHARTER_ID: i64 = 1;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("caretaker-7"), String::from("caretaker"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Caretaker request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-02-14 10:30 UTC)
}

pub fn create_test_dog(dog_id: i64, health: HealthStatus, adoption: AdoptionStatus) -> Dog {
    let mut dog: Dog = Dog::register(
        TEST_CHARTER_ID,
        DogIntake {
            name: String::from("Bella"),
            age_months: 30,
            gender: DogGender::Female,
            breed: DogBreed::StreetDog,
            color: DogColor::Tan,
            intake_reason: IntakeReason::Rescue,
            arrival_date: datetime!(2026-01-05 08:00 UTC),
            microchip_status: TripleChoice::No,
            microchip_id: None,
            initial_weight_kg: Some(14.0),
            height_cm: 42.0,
            detailed_description: String::new(),
            health_status: health,
            vaccination_status: VaccinationStatus::Complete,
            castration_status: TripleChoice::Yes,
            adoption_status: adoption,
            owner_id: None,
            special_needs: String::new(),
            behavioral_notes: String::new(),
            other_notes: String::new(),
        },
    );
    dog.dog_id = Some(dog_id);
    dog
}

pub fn create_test_adoptee(adoptee_id: i64, status: AdoptionStatus) -> Adoptee {
    let entity: EntityInfo = EntityInfo::with_id(
        adoptee_id,
        String::from("Jane Doe"),
        Some(format!("jane{adoptee_id}@example.com")),
        None,
        None,
    );
    let contact: Contact = Contact::with_id(
        adoptee_id,
        entity,
        String::new(),
        datetime!(2026-01-02 09:00 UTC),
        datetime!(2026-01-02 09:00 UTC),
    );
    Adoptee::with_id(adoptee_id, contact, TEST_CHARTER_ID, status)
}

pub fn create_open_record(record_id: i64, dog_id: i64, adoptee_id: i64) -> AdoptionRecord {
    let mut record: AdoptionRecord =
        AdoptionRecord::open(dog_id, adoptee_id, TEST_CHARTER_ID, String::from("home visit"));
    record.adoption_record_id = Some(record_id);
    record.start_date = Some(datetime!(2026-02-01 09:00 UTC));
    record
}
