//! SQL definition of the `students` table.
//!
//! # Table structure
//!
//! | column | type | constraint |
//! |---|---|---|
//! | `student_id` | `INTEGER` | primary key, `AUTOINCREMENT` |
//! | `first_name` | `TEXT` | `NOT NULL` |
//! | `last_name` | `TEXT` | `NOT NULL` |
//! | `email` | `TEXT` | `NOT NULL UNIQUE` |
//! | `enrollment_date` | `DATE` | nullable, stored as `YYYY-MM-DD` text |
//!
//! `AUTOINCREMENT` keeps ids from being reused after a delete. Dropping the
//! table also clears its `sqlite_sequence` entry, so a refresh restarts ids
//! at 1.

use student_roster_core::STUDENTS_TABLE;

/// Creates the `students` table if it does not exist.
pub const CREATE_STUDENTS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    enrollment_date DATE
);
"#;

/// Drops the `students` table.
pub const DROP_STUDENTS_SQL: &str = "DROP TABLE IF EXISTS students;";

/// Columns in display order, as a `SELECT` list.
pub(crate) const SELECT_COLUMNS: &str =
    "student_id, first_name, last_name, email, enrollment_date";

/// Returns whether the `students` table exists on this connection.
pub(crate) fn table_exists(conn: &rusqlite::Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [STUDENTS_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
