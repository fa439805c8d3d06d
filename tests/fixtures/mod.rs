// Test fixtures - reusable test data
// Provides consistent dates and a seeded record store across test files
#![allow(dead_code)]

use chrono::NaiveDate;

use secretaria::models::records::{Course, Person, SchoolClass};
use secretaria::services::secretariat::{RecordStore, SecretariatService};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Wednesday, Jan 1 2025
    pub fn jan_1_2025() -> NaiveDate {
        ymd(2025, 1, 1)
    }

    /// Wednesday, Jan 8 2025
    pub fn jan_8_2025() -> NaiveDate {
        ymd(2025, 1, 8)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }

    /// Dec 31, 2024 (year boundary)
    pub fn new_years_eve_2024() -> NaiveDate {
        ymd(2024, 12, 31)
    }

    /// Every Wednesday of January 2025
    pub fn january_2025_wednesdays() -> Vec<NaiveDate> {
        vec![
            ymd(2025, 1, 1),
            ymd(2025, 1, 8),
            ymd(2025, 1, 15),
            ymd(2025, 1, 22),
            ymd(2025, 1, 29),
        ]
    }
}

/// Sample records for testing
pub mod records {
    use super::*;

    /// Ids created by [`seeded_store`].
    pub struct Seeded {
        pub class_id: i64,
        pub enrollment_ids: Vec<i64>,
    }

    /// Course "Violão", class "Turma A" running through the first half of 2025
    /// and two enrolled students.
    pub fn seeded_store() -> (RecordStore, Seeded) {
        let mut store = RecordStore::in_memory();
        let seeded = {
            let mut service = SecretariatService::new(&mut store);
            let course = service.create_course(Course::new("Violão", "presencial")).unwrap();
            let class = service
                .create_class(SchoolClass::new(
                    course.id.unwrap(),
                    "Turma A",
                    dates::ymd(2025, 1, 1),
                    dates::ymd(2025, 6, 30),
                ))
                .unwrap();
            let class_id = class.id.unwrap();

            let enrollment_ids = ["Ana Souza", "Bruno Lima"]
                .iter()
                .map(|name| {
                    let person = service.create_person(Person::new(*name)).unwrap();
                    service.enroll(class_id, person.id.unwrap()).unwrap().id.unwrap()
                })
                .collect();
            Seeded {
                class_id,
                enrollment_ids,
            }
        };
        (store, seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(dates::jan_1_2025().weekday(), chrono::Weekday::Wed);
        assert_eq!(dates::leap_day_2024().day(), 29);
        assert!(dates::january_2025_wednesdays()
            .iter()
            .all(|d| d.weekday() == chrono::Weekday::Wed));
    }
}
