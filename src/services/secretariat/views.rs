use serde::{Deserialize, Serialize};

use crate::models::records::EnrollmentStatus;

/// One line of a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub enrollment_id: i64,
    pub person_id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub status: EnrollmentStatus,
}

/// One line of a lesson's attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRow {
    pub attendance_id: i64,
    pub enrollment_id: i64,
    pub person_id: i64,
    pub full_name: String,
    pub present: Option<bool>,
    pub note: Option<String>,
}

/// Attendance taken for one enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub enrollment_id: i64,
    #[serde(default)]
    pub present: Option<bool>,
    #[serde(default)]
    pub note: Option<String>,
}

impl AttendanceUpdate {
    pub fn present(enrollment_id: i64) -> Self {
        Self {
            enrollment_id,
            present: Some(true),
            note: None,
        }
    }

    pub fn absent(enrollment_id: i64, note: Option<&str>) -> Self {
        Self {
            enrollment_id,
            present: Some(false),
            note: note.map(str::to_string),
        }
    }
}
