//! Secretariat service: people, courses, classes, enrollments, lessons and attendance.
//!
//! Opening a lesson is the one step with real rules: the lesson is upserted
//! per (class, date) and a pending attendance row is generated for every
//! active enrollment, skipping rows that already exist. The calendar picker
//! feeds [`SecretariatService::schedule_lessons`] with the dates it publishes.

mod store;
mod views;

use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDate};

use crate::models::records::{
    Attendance, Course, Enrollment, EnrollmentStatus, Lesson, Person, Record,
    RecordValidationError, SchoolClass,
};
use crate::utils::date::parse_iso_date;

pub use store::RecordStore;
pub use views::{AttendanceRow, AttendanceUpdate, RosterEntry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretariatError {
    #[error(transparent)]
    Validation(#[from] RecordValidationError),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error("enrollment {enrollment_id} has no attendance row for lesson {lesson_id}")]
    NotOnAttendanceSheet { lesson_id: i64, enrollment_id: i64 },
    #[error("invalid date '{0}' (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("{date} is outside class {class_id} ({start} to {end})")]
    OutsideClassPeriod {
        class_id: i64,
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, SecretariatError>;

fn not_found<T: Record>(id: i64) -> SecretariatError {
    SecretariatError::NotFound { kind: T::KIND, id }
}

/// Id of a record read back from a repository.
fn stored_id<T: Record>(record: &T) -> i64 {
    record.id().unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` date received from a host application.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    parse_iso_date(text).map_err(|_| SecretariatError::InvalidDate(text.trim().to_string()))
}

/// Service for the secretariat records held in a [`RecordStore`].
pub struct SecretariatService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> SecretariatService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    // People and courses

    pub fn create_person(&mut self, person: Person) -> Result<Person> {
        person.validate()?;
        let person = Person {
            full_name: person.full_name.trim().to_string(),
            ..person
        };
        let stored = self.store.people.create(person);
        log::info!("Created person {:?} ({})", stored.id, stored.full_name);
        Ok(stored)
    }

    pub fn get_person(&self, id: i64) -> Result<Person> {
        self.store.people.find_by_id(id).ok_or_else(|| not_found::<Person>(id))
    }

    pub fn create_course(&mut self, course: Course) -> Result<Course> {
        course.validate()?;
        let course = Course {
            created_at: Some(Local::now()),
            ..course
        };
        let stored = self.store.courses.create(course);
        log::info!("Created course {:?} ({})", stored.id, stored.name);
        Ok(stored)
    }

    /// All courses, newest first.
    pub fn list_courses(&self) -> Vec<Course> {
        let mut courses = self.store.courses.list();
        courses.reverse();
        courses
    }

    // Classes

    pub fn create_class(&mut self, class: SchoolClass) -> Result<SchoolClass> {
        class.validate()?;
        if self.store.courses.find_by_id(class.course_id).is_none() {
            return Err(not_found::<Course>(class.course_id));
        }
        let class = SchoolClass {
            created_at: Some(Local::now()),
            ..class
        };
        let stored = self.store.classes.create(class);
        log::info!(
            "Created class {:?} ({}) for course {}",
            stored.id,
            stored.name,
            stored.course_id
        );
        Ok(stored)
    }

    pub fn get_class(&self, id: i64) -> Result<SchoolClass> {
        self.store.classes.find_by_id(id).ok_or_else(|| not_found::<SchoolClass>(id))
    }

    /// Classes, newest first, optionally restricted to one course.
    pub fn list_classes(&self, course_id: Option<i64>) -> Vec<SchoolClass> {
        let mut classes = match course_id {
            Some(course_id) => self
                .store
                .classes
                .filter(&|c: &SchoolClass| c.course_id == course_id),
            None => self.store.classes.list(),
        };
        classes.reverse();
        classes
    }

    // Enrollments

    /// Enroll a person in a class. An existing enrollment for the same pair
    /// is returned unchanged instead of creating a duplicate.
    pub fn enroll(&mut self, class_id: i64, person_id: i64) -> Result<Enrollment> {
        self.get_class(class_id)?;
        self.get_person(person_id)?;

        let existing = self
            .store
            .enrollments
            .find_first(&|e: &Enrollment| e.class_id == class_id && e.person_id == person_id);
        if let Some(existing) = existing {
            log::debug!("Person {} already enrolled in class {}", person_id, class_id);
            return Ok(existing);
        }

        let stored = self.store.enrollments.create(Enrollment::new(class_id, person_id));
        log::info!("Enrolled person {} in class {}", person_id, class_id);
        Ok(stored)
    }

    pub fn set_enrollment_status(
        &mut self,
        enrollment_id: i64,
        status: EnrollmentStatus,
    ) -> Result<Enrollment> {
        let mut enrollment = self
            .store
            .enrollments
            .find_by_id(enrollment_id)
            .ok_or_else(|| not_found::<Enrollment>(enrollment_id))?;
        enrollment.status = status;
        self.store.enrollments.update(&enrollment);
        Ok(enrollment)
    }

    /// Enrollments of a class joined with the person, oldest first.
    pub fn class_roster(&self, class_id: i64) -> Result<Vec<RosterEntry>> {
        self.get_class(class_id)?;
        let enrollments = self.store.enrollments.filter(&|e: &Enrollment| e.class_id == class_id);

        let mut roster = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let person = self.get_person(enrollment.person_id)?;
            roster.push(RosterEntry {
                enrollment_id: stored_id(&enrollment),
                person_id: enrollment.person_id,
                full_name: person.full_name,
                email: person.email,
                status: enrollment.status,
            });
        }
        Ok(roster)
    }

    // Lessons and attendance

    /// Open the lesson of `class_id` on `date` and generate its attendance sheet.
    ///
    /// An existing lesson on that date is reused: its title is replaced when a
    /// new one is given and `is_extra` is always updated. Every enrollment
    /// with status Enrolled then gets a pending attendance row unless it
    /// already has one for this lesson.
    pub fn open_lesson(
        &mut self,
        class_id: i64,
        date: NaiveDate,
        title: Option<&str>,
        is_extra: bool,
    ) -> Result<Lesson> {
        self.get_class(class_id)?;

        let existing = self
            .store
            .lessons
            .find_first(&|l: &Lesson| l.class_id == class_id && l.date == date);
        let lesson = match existing {
            Some(mut lesson) => {
                if let Some(title) = title {
                    lesson.title = Some(title.to_string());
                }
                lesson.is_extra = is_extra;
                self.store.lessons.update(&lesson);
                log::debug!("Reopened lesson {:?} of class {} on {}", lesson.id, class_id, date);
                lesson
            }
            None => {
                let lesson = Lesson {
                    title: title.map(str::to_string),
                    is_extra,
                    ..Lesson::new(class_id, date)
                };
                self.store.lessons.create(lesson)
            }
        };
        let lesson_id = stored_id(&lesson);

        let created = self.generate_attendance(class_id, lesson_id);
        log::info!(
            "Opened lesson {} of class {} on {} ({} attendance row(s) created)",
            lesson_id,
            class_id,
            date,
            created
        );
        Ok(lesson)
    }

    fn generate_attendance(&mut self, class_id: i64, lesson_id: i64) -> usize {
        let enrolled: Vec<i64> = self
            .store
            .enrollments
            .filter(&|e: &Enrollment| {
                e.class_id == class_id && e.status == EnrollmentStatus::Enrolled
            })
            .into_iter()
            .filter_map(|e| e.id)
            .collect();
        if enrolled.is_empty() {
            return 0;
        }

        let already: HashSet<i64> = self
            .store
            .attendance
            .filter(&|a: &Attendance| a.lesson_id == lesson_id)
            .into_iter()
            .map(|a| a.enrollment_id)
            .collect();

        let mut created = 0;
        for enrollment_id in enrolled {
            if already.contains(&enrollment_id) {
                continue;
            }
            self.store
                .attendance
                .create(Attendance::pending(lesson_id, enrollment_id));
            created += 1;
        }
        created
    }

    /// Attendance sheet of a lesson joined with the students' names, by id.
    pub fn lesson_attendance(&self, lesson_id: i64) -> Result<Vec<AttendanceRow>> {
        if self.store.lessons.find_by_id(lesson_id).is_none() {
            return Err(not_found::<Lesson>(lesson_id));
        }

        let rows = self.store.attendance.filter(&|a: &Attendance| a.lesson_id == lesson_id);
        let mut sheet = Vec::with_capacity(rows.len());
        for row in rows {
            let enrollment = self
                .store
                .enrollments
                .find_by_id(row.enrollment_id)
                .ok_or_else(|| not_found::<Enrollment>(row.enrollment_id))?;
            let person = self.get_person(enrollment.person_id)?;
            sheet.push(AttendanceRow {
                attendance_id: stored_id(&row),
                enrollment_id: row.enrollment_id,
                person_id: enrollment.person_id,
                full_name: person.full_name,
                present: row.present,
                note: row.note,
            });
        }
        Ok(sheet)
    }

    /// Record attendance for several students of one lesson.
    ///
    /// Every item must match an existing attendance row of the lesson;
    /// nothing is written when one does not. Returns the number of rows updated.
    pub fn record_attendance(
        &mut self,
        lesson_id: i64,
        items: &[AttendanceUpdate],
    ) -> Result<usize> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let enrollment_id = item.enrollment_id;
            let row = self
                .store
                .attendance
                .find_first(&|a: &Attendance| {
                    a.lesson_id == lesson_id && a.enrollment_id == enrollment_id
                })
                .ok_or(SecretariatError::NotOnAttendanceSheet {
                    lesson_id,
                    enrollment_id,
                })?;
            resolved.push((row, item));
        }

        for (mut row, item) in resolved {
            row.present = item.present;
            row.note = item.note.clone();
            self.store.attendance.update(&row);
        }
        log::info!("Recorded attendance for {} student(s) at lesson {}", items.len(), lesson_id);
        Ok(items.len())
    }

    /// Open one lesson per date, in date order.
    ///
    /// All dates are checked against the class period before anything is written.
    pub fn schedule_lessons(&mut self, class_id: i64, dates: &[NaiveDate]) -> Result<Vec<Lesson>> {
        let class = self.get_class(class_id)?;
        let dates: BTreeSet<NaiveDate> = dates.iter().copied().collect();

        if let Some(outside) = dates.iter().find(|d| !class.runs_on(**d)) {
            return Err(SecretariatError::OutsideClassPeriod {
                class_id,
                date: *outside,
                start: class.start_date,
                end: class.end_date,
            });
        }

        dates
            .into_iter()
            .map(|date| self.open_lesson(class_id, date, None, false))
            .collect()
    }

    /// Lessons of a class, in date order.
    pub fn class_lessons(&self, class_id: i64) -> Vec<Lesson> {
        let mut lessons = self.store.lessons.filter(&|l: &Lesson| l.class_id == class_id);
        lessons.sort_by_key(|l| l.date);
        lessons
    }
}
