//! Database configuration from the environment.
//!
//! Settings are read from process environment variables, falling back to an
//! env file (`KEY=VALUE` per line). Variables already set in the process
//! environment take precedence over the file.
//!
//! # Example env file
//!
//! ```text
//! # local development database
//! STUDENTS_DATABASE=./students.db
//! STUDENTS_ALLOW_RESET=1
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path to the SQLite database file. Required.
pub const DATABASE_VAR: &str = "STUDENTS_DATABASE";
/// Enables `migrate down` and `migrate refresh` when truthy.
pub const ALLOW_RESET_VAR: &str = "STUDENTS_ALLOW_RESET";

/// Resolved database settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: PathBuf,
    pub allow_reset: bool,
}

impl StoreConfig {
    /// Loads settings from the process environment and the optional env file.
    ///
    /// A missing env file is not an error; an unreadable one is.
    pub fn load(env_file: &Path) -> Result<Self, String> {
        Self::load_with(env_file, |key| std::env::var(key).ok())
    }

    fn load_with(
        env_file: &Path,
        process_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let file_vars = match std::fs::read_to_string(env_file) {
            Ok(contents) => parse_env_file(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(format!(
                    "Failed to read env file '{}': {e}",
                    env_file.display()
                ));
            }
        };

        Self::from_lookup(|key| process_env(key).or_else(|| file_vars.get(key).cloned()))
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database = lookup(DATABASE_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                format!(
                    "missing environment variables: {DATABASE_VAR}. \
                     Set it or add it to a .env file"
                )
            })?;

        let allow_reset = lookup(ALLOW_RESET_VAR)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Ok(Self {
            database: PathBuf::from(database.trim()),
            allow_reset,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped, an optional `export ` prefix is
/// ignored, and matching single or double quotes around the value are
/// stripped. Later assignments override earlier ones.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    vars
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_parse_env_file() {
        let vars = parse_env_file(
            "# comment\n\nSTUDENTS_DATABASE=\"/tmp/my db.sqlite\"\nexport STUDENTS_ALLOW_RESET='yes'\nnot a pair\n=orphan\n",
        );
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["STUDENTS_DATABASE"], "/tmp/my db.sqlite");
        assert_eq!(vars["STUDENTS_ALLOW_RESET"], "yes");
    }

    #[test]
    fn test_parse_env_file_later_wins() {
        let vars = parse_env_file("A=1\nA=2\n");
        assert_eq!(vars["A"], "2");
    }

    #[test]
    fn test_database_is_required() {
        let err = StoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.contains(DATABASE_VAR));

        let err = StoreConfig::from_lookup(lookup(&[(DATABASE_VAR, "  ")])).unwrap_err();
        assert!(err.contains(DATABASE_VAR));
    }

    #[test]
    fn test_reset_defaults_off() {
        let config = StoreConfig::from_lookup(lookup(&[(DATABASE_VAR, "students.db")])).unwrap();
        assert_eq!(config.database, PathBuf::from("students.db"));
        assert!(!config.allow_reset);

        let config = StoreConfig::from_lookup(lookup(&[
            (DATABASE_VAR, "students.db"),
            (ALLOW_RESET_VAR, "0"),
        ]))
        .unwrap();
        assert!(!config.allow_reset);

        let config = StoreConfig::from_lookup(lookup(&[
            (DATABASE_VAR, "students.db"),
            (ALLOW_RESET_VAR, "TRUE"),
        ]))
        .unwrap();
        assert!(config.allow_reset);
    }

    #[test]
    fn test_load_reads_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "STUDENTS_DATABASE=from-file.db\nSTUDENTS_ALLOW_RESET=1\n").unwrap();

        let config = StoreConfig::load_with(&path, |_| None).unwrap();
        assert_eq!(config.database, PathBuf::from("from-file.db"));
        assert!(config.allow_reset);
    }

    #[test]
    fn test_process_env_overrides_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "STUDENTS_DATABASE=from-file.db\n").unwrap();

        let config = StoreConfig::load_with(&path, lookup(&[(DATABASE_VAR, "from-env.db")])).unwrap();
        assert_eq!(config.database, PathBuf::from("from-env.db"));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_with(
            &dir.path().join("absent.env"),
            lookup(&[(DATABASE_VAR, "students.db")]),
        )
        .unwrap();
        assert_eq!(config.database, PathBuf::from("students.db"));
    }
}
