//! File persistence adapters for repository snapshots.
//!
//! # Responsibility
//! - Save and load whole record lists; repositories stay storage-agnostic.
//!
//! # Invariants
//! - I/O and format failures surface as `StoreError`, never as partial data.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;

pub use json_store::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "store `{}`: {source}", path.display()),
            Self::Serialize(err) => write!(f, "failed to serialize records: {err}"),
            Self::Deserialize { path, source } => {
                write!(f, "store `{}` holds malformed data: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Deserialize { source, .. } => Some(source),
        }
    }
}
