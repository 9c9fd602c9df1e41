//! Domain kernel for the tallynote counter and notes apps.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use error::{CoreResult, Failure};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::counter::{Counter, CounterId};
pub use model::note::{Note, NoteId};
pub use model::notes_collection::{NotesCollection, DEFAULT_NOTES_CAPACITY};
pub use model::value::{
    BoundedCounter, NoteContent, NoteTimestamp, ValidationError, NOTE_CONTENT_MAX_CHARS,
};
pub use repo::kv_counter_repo::KvCounterRepository;
pub use repo::kv_notes_repo::KvNotesRepository;
pub use repo::{
    CounterRepository, LoadReport, NotesRepository, COUNTER_STORAGE_KEY, NOTES_STORAGE_KEY,
};
pub use service::counter::{
    CounterService, DecrementCounter, GetCounter, IncrementCounter, ResetCounter,
};
pub use service::notes::{
    AddNote, ArchiveNote, ClearAllNotes, DeleteNote, GetAllNotes, NotesService, ToggleArchived,
    UpdateNote,
};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
