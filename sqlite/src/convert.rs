//! Conversion between [`Student`] values and SQLite rows.
//!
//! Also classifies SQLite failures into the store's error taxonomy: a
//! `UNIQUE` violation on insert or update can only come from the `email`
//! column, so it becomes [`StoreError::DuplicateEmail`].

use rusqlite::{Connection, Row, params};
use student_roster_core::{NewStudent, Student};

use crate::error::StoreError;

/// Reads a [`Student`] from a row selected with
/// [`SELECT_COLUMNS`](crate::schema::SELECT_COLUMNS).
pub(crate) fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        student_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        enrollment_date: row.get(4)?,
    })
}

/// Inserts one student and returns the database-assigned id.
///
/// Runs on whatever connection or transaction it is given, so seeding can
/// batch inserts while the add operation auto-commits a single statement.
pub(crate) fn insert_student(conn: &Connection, student: &NewStudent) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO students (first_name, last_name, email, enrollment_date) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            student.first_name,
            student.last_name,
            student.email,
            student.enrollment_date
        ],
    )
    .map_err(|e| classify_write_error(e, &student.email))?;

    Ok(conn.last_insert_rowid())
}

/// Returns true for SQLite's `SQLITE_CONSTRAINT_UNIQUE` extended code.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Maps a failed insert/update into the store error taxonomy.
pub(crate) fn classify_write_error(err: rusqlite::Error, email: &str) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateEmail(email.to_string())
    } else {
        StoreError::Database(err)
    }
}
