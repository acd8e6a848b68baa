//! Core student record types, validation, and seed data.
//!
//! This crate defines the data model shared by the storage backend and the
//! command-line tool:
//!
//! - [`Student`]: a stored row with its database-assigned id.
//! - [`NewStudent`]: input to an insert.
//! - [`SeedSet`]: rows loaded into a freshly created table, either the
//!   built-in demo set or a JSON/YAML seed file.
//!
//! Validation ([`validate_new_student`], [`validate_email`],
//! [`parse_enrollment_date`]) runs before any database call so that malformed
//! input is rejected without touching the store.
//!
//! # Example
//!
//! ```
//! use student_roster_core::*;
//!
//! let date = parse_enrollment_date("2023-01-01").unwrap();
//! let student = NewStudent::new("Alice", "A", "alice@example.com").enrolled_on(date);
//! assert!(validate_new_student(&student).is_empty());
//!
//! let stored = student.with_id(1);
//! assert_eq!(stored.full_name(), "Alice A");
//! ```

mod seed;
mod types;
mod validate;

pub use seed::{SeedError, SeedSet};
pub use types::*;
pub use validate::{ValidationError, parse_enrollment_date, validate_email, validate_new_student};
