//! Lifecycle operations for the `students` table.
//!
//! Provides [`Migration`] for creating, dropping, seeding, and refreshing
//! the table. Dropping is destructive and only intended for development
//! resets, so [`down`](Migration::down) and [`refresh`](Migration::refresh)
//! are refused unless the migration was built with
//! [`allow_reset(true)`](Migration::allow_reset).
//!
//! # Example
//!
//! ```no_run
//! use student_roster_core::SeedSet;
//! use student_roster_sqlite::Migration;
//!
//! let mut migration = Migration::open("students.db").unwrap();
//!
//! // Create the table
//! migration.up().unwrap();
//!
//! // Load the demo rows
//! migration.seed(&SeedSet::builtin()).unwrap();
//!
//! let status = migration.status().unwrap();
//! println!("Students: {}", status.student_count);
//! ```

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use student_roster_core::SeedSet;
use tracing::{debug, info};

use crate::convert;
use crate::error::{Result, StoreError};
use crate::schema::{CREATE_STUDENTS_SQL, DROP_STUDENTS_SQL, table_exists};

/// Manages the lifecycle of the `students` table.
///
/// Mutations run inside a transaction, so a seed that hits a duplicate
/// email inserts nothing.
///
/// # Examples
///
/// ```no_run
/// use student_roster_core::SeedSet;
/// use student_roster_sqlite::Migration;
///
/// let mut migration = Migration::open("students.db")
///     .unwrap()
///     .allow_reset(true);
///
/// // Full reset (drop + recreate + seed)
/// let report = migration.refresh(&SeedSet::builtin()).unwrap();
/// println!("Inserted {} students", report.students_inserted);
/// ```
pub struct Migration {
    conn: Connection,
    allow_reset: bool,
}

impl Migration {
    /// Creates a migration manager for an open connection.
    ///
    /// Destructive operations are disabled until
    /// [`allow_reset`](Self::allow_reset) is called.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            allow_reset: false,
        }
    }

    /// Opens (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(conn))
    }

    /// Opens the database file at `path` only if it already exists.
    ///
    /// Use this for operations that never need a fresh file (`down`, `seed`,
    /// `status`), so a mistyped path is reported instead of leaving an empty
    /// database behind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file is missing or cannot be
    /// opened.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(open_existing_connection(path.as_ref())?))
    }

    /// Enables or disables [`down`](Self::down) and [`refresh`](Self::refresh).
    pub fn allow_reset(mut self, allow: bool) -> Self {
        self.allow_reset = allow;
        self
    }

    /// Creates the `students` table.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS` so it is safe to call multiple times.
    pub fn up(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(CREATE_STUDENTS_SQL)?;
        tx.commit()?;
        info!("students table created");
        Ok(())
    }

    /// Drops the `students` table and every row in it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ResetNotAllowed`] unless resets were enabled.
    pub fn down(&mut self) -> Result<()> {
        self.ensure_reset_allowed()?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(DROP_STUDENTS_SQL)?;
        tx.commit()?;
        info!("students table dropped");
        Ok(())
    }

    /// Inserts every row of `seed` within a single transaction.
    ///
    /// Seeding twice with the same rows fails on the email constraint with
    /// [`StoreError::DuplicateEmail`]; the second attempt inserts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SchemaMissing`] if the table does not exist.
    pub fn seed(&mut self, seed: &SeedSet) -> Result<SeedReport> {
        if !table_exists(&self.conn)? {
            return Err(StoreError::SchemaMissing);
        }

        let tx = self.conn.transaction()?;
        let mut report = SeedReport::default();

        for student in seed.students() {
            let student_id = convert::insert_student(&tx, student)?;
            report.student_ids.push(student_id);
            report.students_inserted += 1;
        }

        tx.commit()?;
        info!(inserted = report.students_inserted, "seed complete");
        Ok(report)
    }

    /// Drops the table, recreates it, and seeds it.
    ///
    /// Equivalent to calling [`down`](Self::down), [`up`](Self::up), then
    /// [`seed`](Self::seed) in sequence.
    pub fn refresh(&mut self, seed: &SeedSet) -> Result<SeedReport> {
        self.down()?;
        self.up()?;
        self.seed(seed)
    }

    /// Returns whether the table exists and how many rows it holds.
    pub fn status(&self) -> Result<MigrationStatus> {
        if !table_exists(&self.conn)? {
            return Ok(MigrationStatus {
                table_exists: false,
                student_count: 0,
            });
        }

        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;

        Ok(MigrationStatus {
            table_exists: true,
            student_count: count as usize,
        })
    }

    /// Consumes the migration and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn ensure_reset_allowed(&self) -> Result<()> {
        if !self.allow_reset {
            debug!("refused to drop students table: reset not allowed");
            return Err(StoreError::ResetNotAllowed);
        }
        Ok(())
    }
}

/// Opens an existing database file read-write without creating it.
pub(crate) fn open_existing_connection(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| StoreError::Connection {
        path: path.to_path_buf(),
        source,
    })
}

/// Snapshot returned by [`Migration::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Whether the `students` table exists.
    pub table_exists: bool,
    /// Number of rows stored.
    pub student_count: usize,
}

/// Report of a seed operation.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Number of students inserted.
    pub students_inserted: usize,
    /// Ids assigned to the inserted rows, in seed order.
    pub student_ids: Vec<i64>,
}
