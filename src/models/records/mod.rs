//! Secretariat records: people, courses, classes, enrollments, lessons and attendance.
//!
//! Records carry an `Option<i64>` id that stays `None` until a repository
//! stores them, mirroring how the rest of the crate treats unsaved models.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A model that can be stored in a [`Repository`](crate::services::records::Repository).
pub trait Record: Clone {
    /// Human-readable kind used in error messages ("person", "lesson", ...).
    const KIND: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_record {
    ($ty:ty, $kind:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }
        }
    };
}

/// Validation errors raised before a record is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("full name is required")]
    EmptyFullName,
    #[error("email '{0}' is not a valid address")]
    InvalidEmail(String),
    #[error("course name and modality are required")]
    MissingCourseFields,
    #[error("class name is required")]
    EmptyClassName,
    #[error("class capacity must be greater than zero")]
    ZeroCapacity,
    #[error("class ends ({end}) before it starts ({start})")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// A student or teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<i64>,
    pub full_name: String,
    pub email: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
}

impl Person {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            email: None,
            document: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(RecordValidationError::EmptyFullName);
        }
        if let Some(ref email) = self.email {
            let email = email.trim();
            if !email.is_empty() && !is_plausible_email(email) {
                return Err(RecordValidationError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Option<i64>,
    pub name: String,
    /// Delivery format, e.g. "presencial" or "online".
    pub modality: String,
    pub active: bool,
    pub created_at: Option<DateTime<Local>>,
}

impl Course {
    pub fn new(name: impl Into<String>, modality: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            modality: modality.into(),
            active: true,
            created_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() || self.modality.trim().is_empty() {
            return Err(RecordValidationError::MissingCourseFields);
        }
        Ok(())
    }
}

/// A class (turma) of a course, running between two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: Option<i64>,
    pub course_id: i64,
    pub name: String,
    pub capacity: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Local>>,
}

impl SchoolClass {
    pub fn new(
        course_id: i64,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            course_id,
            name: name.into(),
            capacity: None,
            start_date,
            end_date,
            created_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyClassName);
        }
        if self.capacity == Some(0) {
            return Err(RecordValidationError::ZeroCapacity);
        }
        if self.end_date < self.start_date {
            return Err(RecordValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Whether a lesson on `date` falls inside the class period.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Option<i64>,
    pub class_id: i64,
    pub person_id: i64,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    pub fn new(class_id: i64, person_id: i64) -> Self {
        Self {
            id: None,
            class_id,
            person_id,
            status: EnrollmentStatus::Enrolled,
        }
    }
}

/// A lesson (aula) of a class on a given day. At most one per class and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Option<i64>,
    pub class_id: i64,
    pub date: NaiveDate,
    pub title: Option<String>,
    /// Make-up or extra lesson outside the regular schedule.
    pub is_extra: bool,
}

impl Lesson {
    pub fn new(class_id: i64, date: NaiveDate) -> Self {
        Self {
            id: None,
            class_id,
            date,
            title: None,
            is_extra: false,
        }
    }
}

/// One student's attendance at one lesson. `present` is `None` until taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Option<i64>,
    pub lesson_id: i64,
    pub enrollment_id: i64,
    pub present: Option<bool>,
    pub note: Option<String>,
}

impl Attendance {
    pub fn pending(lesson_id: i64, enrollment_id: i64) -> Self {
        Self {
            id: None,
            lesson_id,
            enrollment_id,
            present: None,
            note: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.present.is_none()
    }
}

impl_record!(Person, "person");
impl_record!(Course, "course");
impl_record!(SchoolClass, "class");
impl_record!(Enrollment, "enrollment");
impl_record!(Lesson, "lesson");
impl_record!(Attendance, "attendance");
