//! Notes repository over a key-value store.
//!
//! # Responsibility
//! - Serialize the notes aggregate into one JSON document under one key.
//! - Rebuild the aggregate on load, recovering from malformed data.
//!
//! # Invariants
//! - A missing key loads as an empty collection.
//! - An unparsable document loads as an empty collection (logged).
//! - Each array element is decoded independently; a bad element is skipped
//!   and the remaining elements still load.
//! - Rebuilt collections satisfy the aggregate invariants: elements that
//!   would duplicate an id or exceed capacity are skipped as well.
//! - `save` rejects collections larger than the repository capacity, so
//!   everything it accepts loads back in full.

use super::dto::{note_from_value, NotesDocumentDto, RawNotesDocument};
use super::{LoadReport, NotesRepository, NOTES_STORAGE_KEY};
use crate::error::{CoreResult, Failure};
use crate::model::notes_collection::{NotesCollection, DEFAULT_NOTES_CAPACITY};
use crate::store::KeyValueStore;
use log::{debug, error, info, warn};

/// Key-value backed implementation of [`NotesRepository`].
pub struct KvNotesRepository<S: KeyValueStore> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> KvNotesRepository<S> {
    /// Repository over `store` using the default key and capacity.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: NOTES_STORAGE_KEY.to_string(),
            capacity: DEFAULT_NOTES_CAPACITY,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Capacity given to every collection rebuilt by `load`.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the collection and reports every record dropped on the way.
    pub fn load_with_report(&self) -> CoreResult<LoadReport<NotesCollection>> {
        let empty = NotesCollection::with_capacity(self.capacity);
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=notes_load module=repo status=ok state=missing count=0");
                return Ok(LoadReport::clean(empty));
            }
            Err(err) => {
                error!(
                    "event=notes_load module=repo status=error error_code=storage_error error={err}"
                );
                return Err(Failure::storage(err.to_string()));
            }
        };

        let document: RawNotesDocument = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(err) => {
                let failure = Failure::corrupted(format!("notes document: {err}"));
                warn!(
                    "event=notes_load module=repo status=recovered error_code={} bytes={} error={failure}",
                    failure.code(),
                    raw.len()
                );
                return Ok(LoadReport {
                    value: empty,
                    recovered: vec![failure],
                });
            }
        };

        let mut collection = empty;
        let mut recovered = Vec::new();
        for (index, value) in document.notes.into_iter().enumerate() {
            let added = note_from_value(value).and_then(|note| collection.add(note));
            match added {
                Ok(next) => collection = next,
                Err(err) => {
                    let failure = match err {
                        Failure::CorruptedRecord { .. } => err,
                        other => Failure::corrupted(format!("note #{index}: {other}")),
                    };
                    warn!(
                        "event=note_item_skipped module=repo status=recovered index={index} error_code={} error={failure}",
                        failure.code()
                    );
                    recovered.push(failure);
                }
            }
        }

        info!(
            "event=notes_load module=repo status=ok count={} skipped={}",
            collection.len(),
            recovered.len()
        );
        Ok(LoadReport {
            value: collection,
            recovered,
        })
    }
}

impl<S: KeyValueStore> NotesRepository for KvNotesRepository<S> {
    fn load(&self) -> CoreResult<NotesCollection> {
        self.load_with_report().map(|report| report.value)
    }

    fn save(&self, collection: &NotesCollection) -> CoreResult<()> {
        if collection.len() > self.capacity {
            let failure = Failure::CapacityExceeded {
                capacity: self.capacity,
            };
            warn!(
                "event=notes_save module=repo status=rejected error_code={} count={} capacity={}",
                failure.code(),
                collection.len(),
                self.capacity
            );
            return Err(failure);
        }
        let serialized = serde_json::to_string(&NotesDocumentDto::from(collection))
            .map_err(|err| Failure::storage(format!("serialize notes: {err}")))?;
        self.store.set(&self.key, &serialized).map_err(|err| {
            error!(
                "event=notes_save module=repo status=error error_code=storage_error error={err}"
            );
            Failure::storage(err.to_string())
        })?;
        info!(
            "event=notes_save module=repo status=ok count={}",
            collection.len()
        );
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        self.store.delete(&self.key).map_err(|err| {
            error!(
                "event=notes_clear module=repo status=error error_code=storage_error error={err}"
            );
            Failure::storage(err.to_string())
        })?;
        info!("event=notes_clear module=repo status=ok");
        Ok(())
    }
}
