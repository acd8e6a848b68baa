//! SQLite storage for the `students` table.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`schema`**: table definition and constraints
//! - **`migration`**: lifecycle operations (up/down/seed/refresh/status)
//! - **`convert`**: `Student` ↔ SQL row transformations and constraint
//!   error classification
//! - **`query`**: runtime CRUD access ([`StudentStore`])
//!
//! # Quick start: migrations
//!
//! ```no_run
//! use student_roster_core::SeedSet;
//! use student_roster_sqlite::Migration;
//!
//! let mut migration = Migration::open("students.db").unwrap();
//! migration.up().unwrap();
//! migration.seed(&SeedSet::builtin()).unwrap();
//! ```
//!
//! # Quick start: queries
//!
//! ```no_run
//! use student_roster_sqlite::StudentStore;
//!
//! let store = StudentStore::open("students.db").unwrap();
//! for student in store.get_all().unwrap() {
//!     println!("{} {}", student.student_id, student.email);
//! }
//! ```

mod convert;
mod error;
mod migration;
mod query;
mod schema;

pub use error::{Result, StoreError};
pub use migration::{Migration, MigrationStatus, SeedReport};
pub use query::StudentStore;
pub use schema::{CREATE_STUDENTS_SQL, DROP_STUDENTS_SQL};
