//! Generic keyed repository and its typed failures.
//!
//! # Responsibility
//! - Own a collection of entities keyed by `Entity::id()`.
//! - Be the only write path for stored entities.
//!
//! # Invariants
//! - No two stored entities share an id (the map key is the uniqueness check).
//! - A failed mutation leaves the stored map untouched.
//! - `update_quantity` validates the new value before looking up the id.
//! - Callers only get `&T` or owned snapshots, never `&mut T`.
//!
//! # Concurrency
//! Mutations take `&mut self`; wrap the repository in a `Mutex` if several
//! threads need to write to it.

use crate::model::entity::{Entity, Stocked};
use log::{debug, warn};
use std::collections::hash_map::{Entry, HashMap};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Insert collided with an existing identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdError<K> {
    pub id: K,
}

impl<K: Display> Display for DuplicateIdError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "item with id {} already exists", self.id)
    }
}

impl<K: Debug + Display> Error for DuplicateIdError<K> {}

/// Lookup, update or removal referenced an absent identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError<K> {
    pub id: K,
}

impl<K: Display> Display for NotFoundError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "item with id {} not found", self.id)
    }
}

impl<K: Debug + Display> Error for NotFoundError<K> {}

/// Proposed quantity violates the non-negative stock constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidQuantityError {
    Negative { quantity: i64 },
    Overflow { current: i64, delta: i64 },
}

impl Display for InvalidQuantityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative { quantity } => {
                write!(f, "quantity cannot be negative (got {quantity})")
            }
            Self::Overflow { current, delta } => {
                write!(f, "quantity {current} + {delta} overflows")
            }
        }
    }
}

impl Error for InvalidQuantityError {}

/// Failure of a quantity mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError<K> {
    InvalidQuantity(InvalidQuantityError),
    NotFound(NotFoundError<K>),
}

impl<K: Display> Display for UpdateError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantity(err) => write!(f, "{err}"),
            Self::NotFound(err) => write!(f, "{err}"),
        }
    }
}

impl<K: Debug + Display + 'static> Error for UpdateError<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuantity(err) => Some(err),
            Self::NotFound(err) => Some(err),
        }
    }
}

impl<K> From<InvalidQuantityError> for UpdateError<K> {
    fn from(value: InvalidQuantityError) -> Self {
        Self::InvalidQuantity(value)
    }
}

impl<K> From<NotFoundError<K>> for UpdateError<K> {
    fn from(value: NotFoundError<K>) -> Self {
        Self::NotFound(value)
    }
}

/// Umbrella error for callers chaining several repository calls with `?`.
///
/// Every variant maps one-to-one onto an operation-level error, so matching
/// still tells which invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError<K> {
    DuplicateId(K),
    NotFound(K),
    InvalidQuantity(InvalidQuantityError),
}

impl<K: Display> Display for RepoError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "item with id {id} already exists"),
            Self::NotFound(id) => write!(f, "item with id {id} not found"),
            Self::InvalidQuantity(err) => write!(f, "{err}"),
        }
    }
}

impl<K: Debug + Display> Error for RepoError<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuantity(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl<K> From<DuplicateIdError<K>> for RepoError<K> {
    fn from(value: DuplicateIdError<K>) -> Self {
        Self::DuplicateId(value.id)
    }
}

impl<K> From<NotFoundError<K>> for RepoError<K> {
    fn from(value: NotFoundError<K>) -> Self {
        Self::NotFound(value.id)
    }
}

impl<K> From<UpdateError<K>> for RepoError<K> {
    fn from(value: UpdateError<K>) -> Self {
        match value {
            UpdateError::InvalidQuantity(err) => Self::InvalidQuantity(err),
            UpdateError::NotFound(err) => Self::NotFound(err.id),
        }
    }
}

/// In-memory store of entities keyed by identity.
#[derive(Debug, Clone)]
pub struct KeyedRepository<T: Entity> {
    items: HashMap<T::Id, T>,
}

impl<T: Entity> Default for KeyedRepository<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<T: Entity> KeyedRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pre-seeded repository.
    ///
    /// # Errors
    /// - Returns the first duplicate id found in `entities`.
    pub fn try_from_entities(
        entities: impl IntoIterator<Item = T>,
    ) -> Result<Self, DuplicateIdError<T::Id>> {
        let mut repo = Self::new();
        for entity in entities {
            repo.add(entity)?;
        }
        Ok(repo)
    }

    /// Inserts a new entity.
    ///
    /// # Errors
    /// - `DuplicateIdError` when the id is already stored; the existing entity
    ///   is kept as-is.
    pub fn add(&mut self, entity: T) -> Result<(), DuplicateIdError<T::Id>> {
        match self.items.entry(entity.id()) {
            Entry::Occupied(slot) => {
                warn!(
                    "event=repo_add module=repo status=error entity={} error_code=duplicate_id id={}",
                    entity_label::<T>(),
                    slot.key()
                );
                Err(DuplicateIdError {
                    id: slot.key().clone(),
                })
            }
            Entry::Vacant(slot) => {
                debug!(
                    "event=repo_add module=repo status=ok entity={} id={}",
                    entity_label::<T>(),
                    slot.key()
                );
                slot.insert(entity);
                Ok(())
            }
        }
    }

    /// Exact-match lookup.
    pub fn get_by_id(&self, id: &T::Id) -> Result<&T, NotFoundError<T::Id>> {
        self.items
            .get(id)
            .ok_or_else(|| NotFoundError { id: id.clone() })
    }

    /// Removes the entity stored under `id` and returns it.
    pub fn remove(&mut self, id: &T::Id) -> Result<T, NotFoundError<T::Id>> {
        match self.items.remove(id) {
            Some(entity) => {
                debug!(
                    "event=repo_remove module=repo status=ok entity={} id={}",
                    entity_label::<T>(),
                    id
                );
                Ok(entity)
            }
            None => {
                warn!(
                    "event=repo_remove module=repo status=error entity={} error_code=not_found id={}",
                    entity_label::<T>(),
                    id
                );
                Err(NotFoundError { id: id.clone() })
            }
        }
    }

    /// Returns an owned snapshot of every stored entity.
    ///
    /// Order follows the hash map and is unspecified; treat the result as a set.
    pub fn list_all(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.values().cloned().collect()
    }

    /// Read-only iteration in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn ids(&self) -> Vec<T::Id> {
        self.items.keys().cloned().collect()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the whole content with `entities`.
    ///
    /// The replacement map is built aside and swapped in only when it is
    /// complete, so a duplicate in the input keeps the current content.
    pub fn replace_all(
        &mut self,
        entities: impl IntoIterator<Item = T>,
    ) -> Result<(), DuplicateIdError<T::Id>> {
        let replacement = Self::try_from_entities(entities)?;
        debug!(
            "event=repo_replace_all module=repo status=ok entity={} previous={} current={}",
            entity_label::<T>(),
            self.items.len(),
            replacement.items.len()
        );
        self.items = replacement.items;
        Ok(())
    }
}

impl<T: Stocked> KeyedRepository<T> {
    /// Sets the quantity of a stored entity.
    ///
    /// # Errors
    /// - `UpdateError::InvalidQuantity` when `new_quantity < 0`. Checked first,
    ///   so a negative value on a missing id is still reported as invalid.
    /// - `UpdateError::NotFound` when `id` is not stored.
    pub fn update_quantity(
        &mut self,
        id: &T::Id,
        new_quantity: i64,
    ) -> Result<(), UpdateError<T::Id>> {
        if new_quantity < 0 {
            warn!(
                "event=repo_update_quantity module=repo status=error entity={} error_code=invalid_quantity id={}",
                entity_label::<T>(),
                id
            );
            return Err(InvalidQuantityError::Negative {
                quantity: new_quantity,
            }
            .into());
        }

        let Some(entity) = self.items.get_mut(id) else {
            warn!(
                "event=repo_update_quantity module=repo status=error entity={} error_code=not_found id={}",
                entity_label::<T>(),
                id
            );
            return Err(NotFoundError { id: id.clone() }.into());
        };

        entity.set_quantity(new_quantity);
        debug!(
            "event=repo_update_quantity module=repo status=ok entity={} id={} quantity={}",
            entity_label::<T>(),
            id,
            new_quantity
        );
        Ok(())
    }

    /// Adds `delta` to the stored quantity and returns the new value.
    ///
    /// The new value goes through `update_quantity`, so a result below zero is
    /// rejected the same way a negative absolute quantity is.
    pub fn increase_stock(&mut self, id: &T::Id, delta: i64) -> Result<i64, UpdateError<T::Id>> {
        let current = self.get_by_id(id)?.quantity();
        let next = current
            .checked_add(delta)
            .ok_or(InvalidQuantityError::Overflow { current, delta })?;
        self.update_quantity(id, next)?;
        Ok(next)
    }
}

impl<T: Entity> FromIterator<T> for KeyedRepository<T> {
    /// Collects entities, keeping the first one seen for each id.
    ///
    /// Use `try_from_entities` when duplicates must be reported.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut repo = Self::new();
        for entity in iter {
            let _ = repo.add(entity);
        }
        repo
    }
}

fn entity_label<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
