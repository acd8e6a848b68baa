//! Seed data for freshly created `students` tables.
//!
//! A [`SeedSet`] is either the built-in demo rows ([`SeedSet::builtin`]) or a
//! list of [`NewStudent`] records read from a JSON or YAML file. Every record
//! is validated on load, so a bad seed file is rejected before any insert.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{NewStudent, ValidationError, validate_new_student};

/// Errors raised while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// File I/O failure.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Extension is neither `.json` nor `.yaml`/`.yml`.
    #[error("unsupported seed file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A record failed validation; `index` is zero-based.
    #[error("seed record {index} is invalid: {error}")]
    InvalidRecord {
        index: usize,
        error: ValidationError,
    },
}

/// Rows inserted by a seed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSet {
    students: Vec<NewStudent>,
}

impl SeedSet {
    /// The demo rows loaded when no seed file is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use student_roster_core::SeedSet;
    ///
    /// let seed = SeedSet::builtin();
    /// assert_eq!(seed.len(), 3);
    /// assert_eq!(seed.students()[0].email, "john.doe@example.com");
    /// ```
    pub fn builtin() -> Self {
        let rows = [
            ("John", "Doe", "john.doe@example.com", (2023, 9, 1)),
            ("Jane", "Smith", "jane.smith@example.com", (2023, 9, 1)),
            ("Jim", "Beam", "jim.beam@example.com", (2023, 9, 2)),
        ];

        let students = rows
            .into_iter()
            .map(|(first, last, email, (y, m, d))| NewStudent {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                enrollment_date: NaiveDate::from_ymd_opt(y, m, d),
            })
            .collect();

        Self { students }
    }

    /// Builds a seed set from records, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::InvalidRecord`] for the first record that fails
    /// validation.
    pub fn new(students: Vec<NewStudent>) -> Result<Self, SeedError> {
        for (index, student) in students.iter().enumerate() {
            if let Some(error) = validate_new_student(student).into_iter().next() {
                return Err(SeedError::InvalidRecord { index, error });
            }
        }
        Ok(Self { students })
    }

    /// Loads a seed set from a `.json`, `.yaml`, or `.yml` file containing an
    /// array of students.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let open = || {
            std::fs::File::open(path)
                .map(BufReader::new)
                .map_err(|source| SeedError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        };

        let students: Vec<NewStudent> = match extension.as_deref() {
            Some("json") => serde_json::from_reader(open()?)?,
            Some("yaml") | Some("yml") => serde_yaml::from_reader(open()?)?,
            _ => return Err(SeedError::UnsupportedFormat(path.to_path_buf())),
        };

        Self::new(students)
    }

    pub fn students(&self) -> &[NewStudent] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl Default for SeedSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_seed_is_valid_and_unique() {
        let seed = SeedSet::builtin();
        assert!(SeedSet::new(seed.students().to_vec()).is_ok());

        let mut emails: Vec<_> = seed.students().iter().map(|s| s.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), seed.len());
    }

    #[test]
    fn test_from_json_file() {
        let file = write_temp(
            ".json",
            r#"[
                {"first_name": "Alice", "last_name": "A", "email": "alice@example.com", "enrollment_date": "2023-01-01"},
                {"first_name": "Bob", "last_name": "B", "email": "bob@example.com"}
            ]"#,
        );
        let seed = SeedSet::from_file(file.path()).unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed.students()[1].enrollment_date, None);
    }

    #[test]
    fn test_from_yaml_file() {
        let file = write_temp(
            ".yml",
            "- first_name: Alice\n  last_name: A\n  email: alice@example.com\n  enrollment_date: 2023-01-01\n",
        );
        let seed = SeedSet::from_file(file.path()).unwrap();
        assert_eq!(seed.students()[0].first_name, "Alice");
        assert_eq!(
            seed.students()[0].enrollment_date,
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
    }

    #[test]
    fn test_from_file_rejects_invalid_record() {
        let file = write_temp(
            ".json",
            r#"[{"first_name": "Alice", "last_name": "A", "email": "nope"}]"#,
        );
        let err = SeedSet::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let file = write_temp(".csv", "first_name,last_name\n");
        assert!(matches!(
            SeedSet::from_file(file.path()),
            Err(SeedError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            SeedSet::from_file("/nonexistent/seed.json"),
            Err(SeedError::Io { .. })
        ));
    }
}
