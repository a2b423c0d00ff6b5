//! Delimited text importers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod grades;

pub type ImportResult<T> = Result<T, ImportError>;

/// Import failure. Any variant aborts the whole read.
#[derive(Debug)]
pub enum ImportError {
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    Io(std::io::Error),
    /// Line does not have the expected number of fields.
    MissingField { line_number: usize, line: String },
    /// Numeric field failed to parse.
    InvalidFormat {
        line_number: usize,
        field: &'static str,
        value: String,
    },
}

impl ImportError {
    /// Returns whether the failure comes from the input content rather than
    /// from reaching the input.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidFormat { .. })
    }
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileOpen { path, source } => {
                write!(f, "cannot open `{}`: {source}", path.display())
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::MissingField { line_number, line } => {
                write!(f, "line {line_number} has missing data: {line}")
            }
            Self::InvalidFormat {
                line_number,
                field,
                value,
            } => write!(f, "line {line_number}: invalid {field}: {value}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileOpen { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::MissingField { .. } | Self::InvalidFormat { .. } => None,
        }
    }
}
