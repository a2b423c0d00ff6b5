//! Comma-delimited student score reader.
//!
//! # Responsibility
//! - Parse `id,name,score` lines into `Student` records.
//!
//! # Invariants
//! - Every line must have exactly three fields.
//! - `id` is validated before `score`.
//! - The first bad line aborts the whole read; no partial result is returned.

use super::{ImportError, ImportResult};
use crate::model::student::Student;
use log::{info, warn};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FIELD_SEPARATOR: char = ',';
const EXPECTED_FIELDS: usize = 3;
const LINE_TERMINATOR: u8 = b'\n';

/// Reads all student records from `reader`.
///
/// Line numbers in errors are 1-based. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than rejected.
pub fn read_students(reader: impl BufRead) -> ImportResult<Vec<Student>> {
    let mut students = Vec::new();
    for (index, raw) in reader.split(LINE_TERMINATOR).enumerate() {
        let raw = raw.map_err(ImportError::Io)?;
        let line = decode_line(&raw);
        let student = parse_student_line(&line, index + 1).inspect_err(|err| {
            warn!(
                "event=grades_import module=import status=error line={} error={}",
                index + 1,
                err
            );
        })?;
        students.push(student);
    }

    info!(
        "event=grades_import module=import status=ok records={}",
        students.len()
    );
    Ok(students)
}

/// Opens `path` and reads all student records from it.
pub fn read_students_from_path(path: impl AsRef<Path>) -> ImportResult<Vec<Student>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_students(BufReader::new(file))
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

fn parse_student_line(line: &str, line_number: usize) -> ImportResult<Student> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != EXPECTED_FIELDS {
        return Err(ImportError::MissingField {
            line_number,
            line: line.to_string(),
        });
    }

    let id = parse_int_field(fields[0], "id", line_number)?;
    let score = parse_int_field(fields[2], "score", line_number)?;
    Ok(Student::new(id, fields[1].trim(), score))
}

fn parse_int_field(raw: &str, field: &'static str, line_number: usize) -> ImportResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ImportError::InvalidFormat {
            line_number,
            field,
            value: raw.to_string(),
        })
}
