//! Plain-text report rendering.
//!
//! # Responsibility
//! - Render record listings and the grade report.
//!
//! # Invariants
//! - Formatting never mutates records; callers pass read-only views.

use crate::model::student::Student;
use log::info;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Renders one grade report line.
pub fn grade_report_line(student: &Student) -> String {
    format!(
        "{} (ID: {}): Score = {}, Grade = {}",
        student.full_name,
        student.id,
        student.score,
        student.grade()
    )
}

/// Writes one report line per student, in the given order.
pub fn write_grade_report(students: &[Student], mut writer: impl Write) -> io::Result<()> {
    for student in students {
        writeln!(writer, "{}", grade_report_line(student))?;
    }
    writer.flush()
}

/// Creates (or truncates) `path` and writes the grade report to it.
pub fn write_grade_report_to_path(students: &[Student], path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    write_grade_report(students, BufWriter::new(file))?;
    info!(
        "event=grade_report module=report status=ok records={}",
        students.len()
    );
    Ok(())
}

/// Renders each item on its own line.
pub fn render_listing<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| format!("{item}\n"))
        .collect()
}
