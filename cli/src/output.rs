//! Output formatting for student listings.

use student_roster_core::{STUDENT_COLUMNS, Student};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Formats a student listing in the requested output format.
pub fn format_students(students: &[Student], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(students_to_table(students)),
        OutputFormat::Json => serde_json::to_string_pretty(students)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(students).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Renders a GitHub-style pipe table, or `(no rows)` for an empty listing.
fn students_to_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "(no rows)".to_string();
    }

    let rows: Vec<[String; 5]> = students
        .iter()
        .map(|s| {
            [
                s.student_id.to_string(),
                s.first_name.clone(),
                s.last_name.clone(),
                s.email.clone(),
                s.enrollment_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = STUDENT_COLUMNS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, STUDENT_COLUMNS.iter().map(|h| h.to_string()), &widths, &[false; 5]);

    out.push('|');
    for (i, width) in widths.iter().enumerate() {
        // Right-align the id column, like numeric columns in tabulate output.
        if i == 0 {
            out.push_str(&format!("{}:|", "-".repeat(width + 1)));
        } else {
            out.push_str(&format!("{}|", "-".repeat(width + 2)));
        }
    }
    out.push('\n');

    let align = [true, false, false, false, false];
    for row in rows {
        push_row(&mut out, row.into_iter(), &widths, &align);
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_row(
    out: &mut String,
    cells: impl Iterator<Item = String>,
    widths: &[usize; 5],
    right_align: &[bool; 5],
) {
    out.push('|');
    for ((cell, width), right) in cells.zip(widths).zip(right_align) {
        if *right {
            out.push_str(&format!(" {cell:>width$} |", width = *width));
        } else {
            out.push_str(&format!(" {cell:<width$} |", width = *width));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_roster_core::NewStudent;

    fn sample() -> Vec<Student> {
        vec![
            NewStudent::new("Alice", "A", "alice@example.com")
                .enrolled_on(chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
                .with_id(1),
            NewStudent::new("Bob", "B", "bob@example.com").with_id(2),
        ]
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(format_students(&[], OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn test_table_layout() {
        let table = format_students(&sample(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "| student_id | first_name | last_name | email             | enrollment_date |"
        );
        assert_eq!(
            lines[1],
            "|-----------:|------------|-----------|-------------------|-----------------|"
        );
        assert_eq!(
            lines[2],
            "|          1 | Alice      | A         | alice@example.com | 2023-01-01      |"
        );
        // No enrollment date renders as an empty cell.
        assert_eq!(
            lines[3],
            "|          2 | Bob        | B         | bob@example.com   |                 |"
        );
        // Every line has the same width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_json_output() {
        let json = format_students(&sample(), OutputFormat::Json).unwrap();
        let parsed: Vec<Student> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_yaml_output() {
        let yaml = format_students(&sample(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("email: alice@example.com"));
        assert!(yaml.contains("2023-01-01"));
    }
}
