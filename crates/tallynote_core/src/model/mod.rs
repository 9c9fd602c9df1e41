//! Domain model for notes and the counter.
//!
//! # Responsibility
//! - Define value objects, entities and the notes aggregate root.
//! - Keep every business invariant inside pure, storage-agnostic types.
//!
//! # Invariants
//! - Domain types are immutable; behavior returns new instances.
//! - Notes collection mutations only happen through aggregate methods.

pub mod counter;
pub mod note;
pub mod notes_collection;
pub mod value;
