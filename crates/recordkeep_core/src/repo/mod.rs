//! Repository layer.
//!
//! # Responsibility
//! - Provide the generic keyed store every domain builds on.
//! - Report each violated invariant as its own error type.
//!
//! # Invariants
//! - Repository errors are returned, never logged-and-swallowed.
//! - A failing call leaves stored state unchanged.

pub mod keyed_repo;
