//! CRUD access to the `students` table.
//!
//! [`StudentStore`] owns one connection for the lifetime of a CLI
//! invocation. Every operation issues exactly one parameterized statement,
//! which SQLite auto-commits; the `UNIQUE` constraint on `email` is the only
//! cross-invocation consistency mechanism.
//!
//! # Example
//!
//! ```no_run
//! use student_roster_core::NewStudent;
//! use student_roster_sqlite::StudentStore;
//!
//! let store = StudentStore::open("students.db").unwrap();
//! let id = store.add(&NewStudent::new("Alice", "A", "alice@example.com")).unwrap();
//! store.update_email(id, "alice.a@example.com").unwrap();
//! println!("{} students", store.get_all().unwrap().len());
//! store.delete(id).unwrap();
//! ```

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use student_roster_core::{NewStudent, Student, validate_email, validate_new_student};
use tracing::debug;

use crate::convert;
use crate::error::{Result, StoreError};
use crate::migration::open_existing_connection;
use crate::schema::{SELECT_COLUMNS, table_exists};

/// Read/write interface to the `students` table.
///
/// # Examples
///
/// ```no_run
/// # use student_roster_sqlite::{StudentStore, StoreError};
/// # let store = StudentStore::open("students.db").unwrap();
/// match store.delete(999_999) {
///     Err(StoreError::StudentNotFound(id)) => println!("nothing to delete for {id}"),
///     other => other.unwrap(),
/// }
/// ```
pub struct StudentStore {
    conn: Connection,
}

impl StudentStore {
    /// Opens an existing database file read-write.
    ///
    /// The file is not created if missing, so a wrong path surfaces as
    /// [`StoreError::Connection`] instead of an empty database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file cannot be opened, or
    /// [`StoreError::SchemaMissing`] if the `students` table does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening student database");
        Self::from_connection(open_existing_connection(path)?)
    }

    /// Wraps an already-open connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SchemaMissing`] if the `students` table does not
    /// exist on this connection.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        if !table_exists(&conn)? {
            return Err(StoreError::SchemaMissing);
        }
        Ok(Self { conn })
    }

    /// Returns all students ordered by `student_id` ascending.
    pub fn get_all(&self) -> Result<Vec<Student>> {
        debug!("selecting all students");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM students ORDER BY student_id"
        ))?;

        let students = stmt
            .query_map([], convert::student_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Looks up one student by id.
    pub fn get(&self, student_id: i64) -> Result<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM students WHERE student_id = ?1"),
                params![student_id],
                convert::student_from_row,
            )
            .optional()?;
        Ok(student)
    }

    /// Number of rows in the table.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Inserts a student and returns the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without touching the database if
    /// a name or the email is blank or malformed, and
    /// [`StoreError::DuplicateEmail`] if the email is already taken.
    pub fn add(&self, student: &NewStudent) -> Result<i64> {
        if let Some(err) = validate_new_student(student).into_iter().next() {
            return Err(err.into());
        }

        debug!(email = %student.email, "inserting student");
        let student_id = convert::insert_student(&self.conn, student)?;
        debug!(student_id, "student inserted");
        Ok(student_id)
    }

    /// Replaces the email of exactly one student.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StudentNotFound`] if no row has this id and
    /// [`StoreError::DuplicateEmail`] if another row already uses the email.
    pub fn update_email(&self, student_id: i64, new_email: &str) -> Result<()> {
        validate_email(new_email)?;

        debug!(student_id, email = %new_email, "updating student email");
        let rows = self
            .conn
            .execute(
                "UPDATE students SET email = ?1 WHERE student_id = ?2",
                params![new_email, student_id],
            )
            .map_err(|e| convert::classify_write_error(e, new_email))?;

        if rows == 0 {
            return Err(StoreError::StudentNotFound(student_id));
        }
        Ok(())
    }

    /// Deletes one student by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StudentNotFound`] if no row has this id.
    pub fn delete(&self, student_id: i64) -> Result<()> {
        debug!(student_id, "deleting student");
        let rows = self.conn.execute(
            "DELETE FROM students WHERE student_id = ?1",
            params![student_id],
        )?;

        if rows == 0 {
            return Err(StoreError::StudentNotFound(student_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CREATE_STUDENTS_SQL;

    fn store() -> StudentStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_STUDENTS_SQL).unwrap();
        StudentStore::from_connection(conn).unwrap()
    }

    #[test]
    fn test_from_connection_requires_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            StudentStore::from_connection(conn),
            Err(StoreError::SchemaMissing)
        ));
    }

    #[test]
    fn test_open_missing_file_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StudentStore::open(dir.path().join("absent.db")).err().unwrap();
        assert!(matches!(err, StoreError::Connection { .. }));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn test_add_validates_before_insert() {
        let store = store();
        let err = store.add(&NewStudent::new("", "A", "a@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_email_validates_before_update() {
        let store = store();
        let id = store.add(&NewStudent::new("A", "B", "a@example.com")).unwrap();
        let err = store.update_email(id, "not an email").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.get(id).unwrap().unwrap().email, "a@example.com");
    }

    #[test]
    fn test_get_missing_returns_none() {
        assert!(store().get(42).unwrap().is_none());
    }

    #[test]
    fn test_update_email_to_own_email_succeeds() {
        let store = store();
        let id = store.add(&NewStudent::new("A", "B", "a@example.com")).unwrap();
        store.update_email(id, "a@example.com").unwrap();
    }
}
