//! Error types for student store operations.
//!
//! Each variant maps to one category a user can act on: the database could
//! not be reached, an email is already taken, an id does not exist, or the
//! input was rejected before any SQL ran.

use std::path::PathBuf;

use student_roster_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during student store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("cannot connect to database '{}': {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The `students` table has not been created yet.
    #[error("the students table does not exist; run `students migrate up` first")]
    SchemaMissing,

    /// Insert or update collided with an existing email.
    #[error("email '{0}' is already in use; choose a different email")]
    DuplicateEmail(String),

    /// Update or delete matched no row.
    #[error("no student found with id {0}")]
    StudentNotFound(i64),

    /// Input was rejected before reaching the database.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Destructive migration attempted without opting in.
    #[error("refusing to drop the students table; set STUDENTS_ALLOW_RESET=1 to allow it")]
    ResetNotAllowed,

    /// Any other SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
