//! Student record type definitions.
//!
//! [`Student`] is a row as stored, with its database-assigned id.
//! [`NewStudent`] is the input to an insert, either from the CLI or from a
//! seed file. Both serialize with [`serde`] so they can be rendered as JSON
//! or YAML and loaded from seed files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name of the single table managed by this workspace.
pub const STUDENTS_TABLE: &str = "students";

/// Column headers in display and `SELECT` order.
pub const STUDENT_COLUMNS: [&str; 5] = [
    "student_id",
    "first_name",
    "last_name",
    "email",
    "enrollment_date",
];

/// A stored student row.
///
/// `student_id` is assigned by the database on insert and never changes.
/// Only `email` is mutable after creation.
///
/// # Examples
///
/// ```
/// use student_roster_core::Student;
/// use chrono::NaiveDate;
///
/// let student = Student {
///     student_id: 1,
///     first_name: "Alice".into(),
///     last_name: "A".into(),
///     email: "alice@example.com".into(),
///     enrollment_date: NaiveDate::from_ymd_opt(2023, 1, 1),
/// };
/// assert_eq!(student.full_name(), "Alice A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
}

impl Student {
    /// Returns `"first last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student that has not been inserted yet.
///
/// Seed files are arrays of this type:
///
/// ```json
/// [
///   { "first_name": "Alice", "last_name": "A", "email": "alice@example.com",
///     "enrollment_date": "2023-01-01" }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
}

impl NewStudent {
    /// Creates a new student without an enrollment date.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enrollment_date: None,
        }
    }

    /// Sets the enrollment date.
    pub fn enrolled_on(mut self, date: NaiveDate) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    /// Attaches a database-assigned id, producing the stored form.
    pub fn with_id(self, student_id: i64) -> Student {
        Student {
            student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            enrollment_date: self.enrollment_date,
        }
    }
}
