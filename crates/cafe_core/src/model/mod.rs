//! Café and employee domain model.
//!
//! # Responsibility
//! - Define the records persisted in the `cafes` and `employees` collections.
//! - Keep external identifiers and internal storage keys as distinct types.
//!
//! # Invariants
//! - External identifiers are permanent for the life of a record.
//! - Internal keys are never serialized to callers.

pub mod cafe;
pub mod employee;
