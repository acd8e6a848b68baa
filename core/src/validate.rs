//! Input validation for student records.
//!
//! Everything here runs before a database call is attempted, so malformed
//! input never reaches the store.
//!
//! # Examples
//!
//! ```
//! use student_roster_core::*;
//!
//! let student = NewStudent::new("Alice", "A", "alice@example.com");
//! assert!(validate_new_student(&student).is_empty());
//!
//! let bad = NewStudent::new("", "A", "not-an-email");
//! assert_eq!(validate_new_student(&bad).len(), 2);
//! ```

use chrono::NaiveDate;
use thiserror::Error;

use crate::NewStudent;

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    /// Email is not of the form `local@domain`.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
    /// Enrollment date is not a valid `YYYY-MM-DD` date.
    #[error("invalid enrollment date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parses an ISO `YYYY-MM-DD` enrollment date.
///
/// # Examples
///
/// ```
/// use student_roster_core::parse_enrollment_date;
///
/// assert!(parse_enrollment_date("2023-09-01").is_ok());
/// assert!(parse_enrollment_date("2023-13-01").is_err());
/// assert!(parse_enrollment_date("09/01/2023").is_err());
/// ```
pub fn parse_enrollment_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidDate(input.to_string());
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?;
    // chrono tolerates signs and unpadded fields; only the canonical layout passes.
    if date.format("%Y-%m-%d").to_string() != trimmed {
        return Err(invalid());
    }
    Ok(date)
}

/// Checks that an email is non-blank, has no whitespace, and has exactly one
/// `@` with text on both sides.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyField("email"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

/// Validates a student before insert.
///
/// Returns every problem found, in field order. An empty vector means the
/// record is acceptable.
pub fn validate_new_student(student: &NewStudent) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if student.first_name.trim().is_empty() {
        errors.push(ValidationError::EmptyField("first name"));
    }
    if student.last_name.trim().is_empty() {
        errors.push(ValidationError::EmptyField("last name"));
    }
    if let Err(err) = validate_email(&student.email) {
        errors.push(err);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enrollment_date_accepts_iso() {
        let date = parse_enrollment_date("2023-01-02").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_enrollment_date_rejects_malformed() {
        for input in [
            "",
            "2023-1-2",
            "+2023-1-01",
            "+2023-01-01",
            "2023-01-1x",
            "2023/01/02",
            "2023-02-30",
            "tomorrow",
            "02-01-2023",
        ] {
            assert!(
                matches!(parse_enrollment_date(input), Err(ValidationError::InvalidDate(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert_eq!(validate_email("  "), Err(ValidationError::EmptyField("email")));
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("al ice@example.com").is_err());
    }

    #[test]
    fn test_validate_new_student_reports_all_fields() {
        let student = NewStudent::new(" ", "", "");
        let errors = validate_new_student(&student);
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyField("first name"),
                ValidationError::EmptyField("last name"),
                ValidationError::EmptyField("email"),
            ]
        );
    }
}
