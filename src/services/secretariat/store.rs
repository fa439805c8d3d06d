use crate::models::records::{Attendance, Course, Enrollment, Lesson, Person, SchoolClass};
use crate::services::records::{MemoryRepository, Repository};

/// The repositories backing a [`SecretariatService`](super::SecretariatService).
pub struct RecordStore {
    pub people: Box<dyn Repository<Person>>,
    pub courses: Box<dyn Repository<Course>>,
    pub classes: Box<dyn Repository<SchoolClass>>,
    pub enrollments: Box<dyn Repository<Enrollment>>,
    pub lessons: Box<dyn Repository<Lesson>>,
    pub attendance: Box<dyn Repository<Attendance>>,
}

impl RecordStore {
    /// Store whose repositories all live in memory.
    pub fn in_memory() -> Self {
        Self {
            people: Box::new(MemoryRepository::<Person>::new()),
            courses: Box::new(MemoryRepository::<Course>::new()),
            classes: Box::new(MemoryRepository::<SchoolClass>::new()),
            enrollments: Box::new(MemoryRepository::<Enrollment>::new()),
            lessons: Box::new(MemoryRepository::<Lesson>::new()),
            attendance: Box::new(MemoryRepository::<Attendance>::new()),
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
