//! Whole-file JSON store for record lists.
//!
//! # Responsibility
//! - Serialize a full record list to one JSON file and read it back.
//!
//! # Invariants
//! - A missing file loads as an empty list.
//! - Malformed content is reported, never loaded partially.
//! - `save` writes a sibling temp file and renames it over the target, so a
//!   failed write never truncates the previous store.

use super::{StoreError, StoreResult};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = ".tmp";

/// JSON file store for a list of `T`.
#[derive(Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `records` as a pretty-printed JSON array.
    ///
    /// # Side effects
    /// - Creates or replaces the backing file.
    /// - Emits `store_save` logging events with record count and duration.
    pub fn save(&self, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let json = serde_json::to_vec_pretty(records).map_err(StoreError::Serialize)?;

        let temp_path = temp_path_for(&self.path);
        let result = std::fs::write(&temp_path, &json)
            .and_then(|()| std::fs::rename(&temp_path, &self.path))
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            });

        match result {
            Ok(()) => {
                info!(
                    "event=store_save module=persist status=ok records={} bytes={} duration_ms={}",
                    records.len(),
                    json.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                let _ = std::fs::remove_file(&temp_path);
                error!(
                    "event=store_save module=persist status=error duration_ms={} error_code=store_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads every record from the backing file.
    ///
    /// Returns an empty list when the file does not exist.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        let started_at = Instant::now();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=store_load module=persist status=ok records=0 missing=true");
                return Ok(Vec::new());
            }
            Err(source) => {
                error!(
                    "event=store_load module=persist status=error error_code=store_read_failed error={}",
                    source
                );
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialize {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "event=store_load module=persist status=ok records={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
