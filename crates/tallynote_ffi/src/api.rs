//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the core use-case entry points to Dart via FRB.
//! - Flatten domain results into envelopes with stable error codes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in the envelope, never thrown.
//! - Mutating calls are serialized process-wide.

use log::warn;
use parking_lot::{Mutex, MutexGuard};
use std::path::PathBuf;
use std::sync::OnceLock;
use tallynote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Counter, CounterService, CoreResult, Failure, KvCounterRepository, KvNotesRepository, Note,
    NoteId, NotesCollection, NotesService, SqliteStore,
};

const DB_FILE_NAME: &str = "tallynote.sqlite3";
const DB_PATH_ENV: &str = "TALLYNOTE_DB_PATH";
const INVALID_ID_CODE: &str = "invalid_id";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the SQLite file used by every later call.
///
/// Must run before the first notes/counter call to take effect.
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "db path already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Note projection for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Stable note id in string form.
    pub id: String,
    pub content: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
    /// `YYYY-MM-DD HH:MM` creation time.
    pub created_at_formatted: String,
    /// Elapsed time label, e.g. `5 minutes ago`.
    pub created_at_relative: String,
    pub archived: bool,
}

/// Notes response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    /// Full collection after the operation, in insertion order.
    pub items: Vec<NoteItem>,
    pub capacity: u32,
    /// Stable failure code (`validation_error`, `not_found`, ...).
    pub error_code: Option<String>,
    /// Human-readable message for diagnostics.
    pub message: String,
}

/// Counter response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterResponse {
    pub ok: bool,
    pub value: i64,
    pub error_code: Option<String>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
}

/// Adds one note from free text.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(content: String) -> NotesResponse {
    notes_call("notes_add", "Note added.", true, |service| {
        service.add_note(&content)
    })
}

/// Replaces the content of one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(id: String, content: String) -> NotesResponse {
    with_note_id("notes_update", &id, |note_id| {
        notes_call("notes_update", "Note updated.", true, |service| {
            service.update_note(note_id, &content)
        })
    })
}

/// Archives one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_archive(id: String) -> NotesResponse {
    with_note_id("notes_archive", &id, |note_id| {
        notes_call("notes_archive", "Note archived.", true, |service| {
            service.archive_note(note_id)
        })
    })
}

/// Flips the archived flag of one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_toggle_archived(id: String) -> NotesResponse {
    with_note_id("notes_toggle_archived", &id, |note_id| {
        notes_call("notes_toggle_archived", "Note updated.", true, |service| {
            service.toggle_archived(note_id)
        })
    })
}

/// Deletes one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NotesResponse {
    with_note_id("notes_delete", &id, |note_id| {
        notes_call("notes_delete", "Note deleted.", true, |service| {
            service.delete_note(note_id)
        })
    })
}

/// Lists all notes in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesResponse {
    notes_call("notes_list", "", false, |service| service.get_all_notes())
}

/// Deletes every note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_clear() -> ActionResponse {
    let _guard = lock_writes();
    let outcome = open_store().and_then(|store| {
        let service = NotesService::new(KvNotesRepository::new(&store));
        service.clear_all_notes()
    });
    match outcome {
        Ok(()) => ActionResponse {
            ok: true,
            error_code: None,
            message: "All notes cleared.".to_string(),
        },
        Err(failure) => ActionResponse {
            ok: false,
            error_code: Some(failure.code().to_string()),
            message: format!("notes_clear failed: {failure}"),
        },
    }
}

/// Reads the counter.
#[flutter_rust_bridge::frb(sync)]
pub fn counter_get() -> CounterResponse {
    counter_call("counter_get", false, |service| service.get_counter())
}

#[flutter_rust_bridge::frb(sync)]
pub fn counter_increment() -> CounterResponse {
    counter_call("counter_increment", true, |service| {
        service.increment_counter()
    })
}

/// Decrements the counter; stays at zero when already zero.
#[flutter_rust_bridge::frb(sync)]
pub fn counter_decrement() -> CounterResponse {
    counter_call("counter_decrement", true, |service| {
        service.decrement_counter()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn counter_reset() -> CounterResponse {
    counter_call("counter_reset", true, |service| service.reset_counter())
}

type NotesFacade<'s> = NotesService<KvNotesRepository<&'s SqliteStore>>;
type CounterFacade<'s> = CounterService<KvCounterRepository<&'s SqliteStore>>;

fn notes_call(
    operation: &str,
    success_message: &str,
    mutates: bool,
    f: impl FnOnce(&NotesFacade<'_>) -> CoreResult<NotesCollection>,
) -> NotesResponse {
    let _guard = mutates.then(lock_writes);
    let outcome = open_store().and_then(|store| {
        let service = NotesService::new(KvNotesRepository::new(&store));
        f(&service)
    });
    match outcome {
        Ok(collection) => {
            let items = collection.iter().map(to_note_item).collect::<Vec<_>>();
            let message = if success_message.is_empty() {
                format!("{} note(s).", items.len())
            } else {
                success_message.to_string()
            };
            NotesResponse {
                ok: true,
                items,
                capacity: capacity_u32(&collection),
                error_code: None,
                message,
            }
        }
        Err(failure) => notes_failure(operation, failure.code(), &failure.to_string()),
    }
}

fn counter_call(
    operation: &str,
    mutates: bool,
    f: impl FnOnce(&CounterFacade<'_>) -> CoreResult<Counter>,
) -> CounterResponse {
    let _guard = mutates.then(lock_writes);
    let outcome = open_store().and_then(|store| {
        let service = CounterService::new(KvCounterRepository::new(&store));
        f(&service)
    });
    match outcome {
        Ok(counter) => CounterResponse {
            ok: true,
            value: counter.value().number(),
            error_code: None,
            message: String::new(),
        },
        Err(failure) => {
            warn!(
                "event=ffi_call module=ffi status=error operation={operation} error_code={}",
                failure.code()
            );
            CounterResponse {
                ok: false,
                value: 0,
                error_code: Some(failure.code().to_string()),
                message: format!("{operation} failed: {failure}"),
            }
        }
    }
}

fn with_note_id(
    operation: &str,
    raw_id: &str,
    f: impl FnOnce(NoteId) -> NotesResponse,
) -> NotesResponse {
    match raw_id.parse::<NoteId>() {
        Ok(note_id) => f(note_id),
        Err(err) => notes_failure(operation, INVALID_ID_CODE, &format!("invalid note id: {err}")),
    }
}

fn notes_failure(operation: &str, code: &str, detail: &str) -> NotesResponse {
    warn!("event=ffi_call module=ffi status=error operation={operation} error_code={code}");
    NotesResponse {
        ok: false,
        items: Vec::new(),
        capacity: 0,
        error_code: Some(code.to_string()),
        message: format!("{operation} failed: {detail}"),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    let created_at = note.created_at();
    NoteItem {
        id: note.id().to_string(),
        content: note.content().text().to_string(),
        created_at: created_at.to_iso8601(),
        created_at_formatted: created_at.formatted(),
        created_at_relative: created_at.relative(),
        archived: note.is_archived(),
    }
}

fn capacity_u32(collection: &NotesCollection) -> u32 {
    u32::try_from(collection.capacity()).unwrap_or(u32::MAX)
}

fn open_store() -> CoreResult<SqliteStore> {
    SqliteStore::open(resolve_db_path())
        .map_err(|err| Failure::storage(format!("db open failed: {err}")))
}

fn lock_writes() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock()
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}
