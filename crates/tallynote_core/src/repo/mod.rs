//! Repository contracts and key-value persistence adapters.
//!
//! # Responsibility
//! - Define domain-facing load/save contracts for notes and the counter.
//! - Confine wire records and storage details to the adapters.
//!
//! # Invariants
//! - Missing persisted state loads as an empty collection / zero counter.
//! - `save` fully replaces prior persisted state.
//! - Storage failures surface as `Failure::Storage`; malformed data is
//!   recovered from and logged, never propagated as fatal.

use crate::error::{CoreResult, Failure};
use crate::model::counter::Counter;
use crate::model::notes_collection::NotesCollection;

pub(crate) mod dto;
pub mod kv_counter_repo;
pub mod kv_notes_repo;

/// Storage key holding the notes document.
pub const NOTES_STORAGE_KEY: &str = "tallynote.notes";
/// Storage key holding the counter record.
pub const COUNTER_STORAGE_KEY: &str = "tallynote.counter";

/// Persistence contract for the notes aggregate.
pub trait NotesRepository {
    /// Loads the persisted collection, empty when nothing was saved yet.
    fn load(&self) -> CoreResult<NotesCollection>;
    /// Replaces the persisted collection.
    fn save(&self, collection: &NotesCollection) -> CoreResult<()>;
    /// Drops all persisted notes; the next `load` yields an empty collection.
    fn clear(&self) -> CoreResult<()>;
}

/// Persistence contract for the counter entity.
pub trait CounterRepository {
    /// Loads the persisted counter, zero when nothing was saved yet.
    fn load_counter(&self) -> CoreResult<Counter>;
    /// Replaces the persisted counter.
    fn save_counter(&self, counter: &Counter) -> CoreResult<()>;
}

impl<R: NotesRepository + ?Sized> NotesRepository for &R {
    fn load(&self) -> CoreResult<NotesCollection> {
        (**self).load()
    }

    fn save(&self, collection: &NotesCollection) -> CoreResult<()> {
        (**self).save(collection)
    }

    fn clear(&self) -> CoreResult<()> {
        (**self).clear()
    }
}

impl<R: CounterRepository + ?Sized> CounterRepository for &R {
    fn load_counter(&self) -> CoreResult<Counter> {
        (**self).load_counter()
    }

    fn save_counter(&self, counter: &Counter) -> CoreResult<()> {
        (**self).save_counter(counter)
    }
}

/// Loaded value plus the corrupted records that were dropped to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport<T> {
    pub value: T,
    /// `Failure::CorruptedRecord` entries, one per recovery decision.
    pub recovered: Vec<Failure>,
}

impl<T> LoadReport<T> {
    pub(crate) fn clean(value: T) -> Self {
        Self {
            value,
            recovered: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.recovered.is_empty()
    }
}
