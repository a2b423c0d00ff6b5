//! Repository paired with a JSON file snapshot.
//!
//! # Responsibility
//! - Keep an in-memory log of records and save/load it as a whole.
//!
//! # Invariants
//! - `load` either replaces the full content or leaves it untouched.
//! - A store holding duplicate ids is rejected as a whole.

use crate::model::entity::Entity;
use crate::persist::{JsonFileStore, StoreError};
use crate::repo::keyed_repo::{DuplicateIdError, KeyedRepository};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum InventoryLogError<K> {
    Store(StoreError),
    DuplicateId(DuplicateIdError<K>),
}

impl<K: Display> Display for InventoryLogError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::DuplicateId(err) => write!(f, "stored log is inconsistent: {err}"),
        }
    }
}

impl<K: Debug + Display + 'static> Error for InventoryLogError<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::DuplicateId(err) => Some(err),
        }
    }
}

impl<K> From<StoreError> for InventoryLogError<K> {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl<K> From<DuplicateIdError<K>> for InventoryLogError<K> {
    fn from(value: DuplicateIdError<K>) -> Self {
        Self::DuplicateId(value)
    }
}

/// In-memory record log with explicit whole-file save/load.
#[derive(Debug)]
pub struct InventoryLog<T: Entity> {
    repo: KeyedRepository<T>,
    store: JsonFileStore<T>,
}

impl<T> InventoryLog<T>
where
    T: Entity + Clone + Serialize + DeserializeOwned,
{
    /// Creates an empty log backed by `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            repo: KeyedRepository::new(),
            store: JsonFileStore::new(path),
        }
    }

    pub fn add(&mut self, item: T) -> Result<(), DuplicateIdError<T::Id>> {
        self.repo.add(item)
    }

    pub fn list(&self) -> Vec<T> {
        self.repo.list_all()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    /// Writes the current content to the backing file.
    pub fn save(&self) -> Result<(), InventoryLogError<T::Id>> {
        self.store.save(&self.repo.list_all())?;
        Ok(())
    }

    /// Replaces the content with what the backing file holds.
    ///
    /// A missing file loads as an empty log.
    pub fn load(&mut self) -> Result<(), InventoryLogError<T::Id>> {
        let records = self.store.load()?;
        self.repo.replace_all(records)?;
        Ok(())
    }
}
