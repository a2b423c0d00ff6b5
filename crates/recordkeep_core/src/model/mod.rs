//! Domain records stored by the keyed repository.
//!
//! # Responsibility
//! - Define the entity capabilities (`Entity`, `Stocked`).
//! - Define the concrete records used by each record-keeping domain.
//!
//! # Invariants
//! - Every record is identified by a stable id exposed through `Entity`.
//! - Records carry no behavior that mutates other records.

pub mod entity;
pub mod health;
pub mod inventory;
pub mod student;
pub mod transaction;
