//! Entity capabilities consumed by the keyed repository.
//!
//! # Responsibility
//! - Describe what a record must expose to be stored by identity.
//! - Describe the optional mutable quantity used by stock maintenance.
//!
//! # Invariants
//! - `Entity::id()` is stable for the whole lifetime of a record.
//! - Quantities are only mutated through repository operations that validate
//!   the new value first.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Record stored by a unique, immutable identity.
pub trait Entity {
    /// Identity type. Must be cheap to clone and printable for error messages.
    type Id: Clone + Eq + Hash + Debug + Display;

    /// Returns the record identity.
    fn id(&self) -> Self::Id;
}

/// Entity carrying a mutable stock quantity.
pub trait Stocked: Entity {
    /// Current quantity.
    fn quantity(&self) -> i64;

    /// Overwrites the quantity.
    ///
    /// Callers outside the repository must not use this on stored records;
    /// `KeyedRepository::update_quantity` is the validated path.
    fn set_quantity(&mut self, quantity: i64);
}
