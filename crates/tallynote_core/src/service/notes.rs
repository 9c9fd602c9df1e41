//! Notes use cases.
//!
//! # Invariants
//! - `AddNote` validates input before touching the repository.
//! - Mutating use cases save only after the aggregate accepted the change.

use super::traced;
use crate::error::CoreResult;
use crate::model::note::{Note, NoteId};
use crate::model::notes_collection::NotesCollection;
use crate::model::value::NoteContent;
use crate::repo::NotesRepository;
use parking_lot::Mutex;

/// Creates a note and appends it to the persisted collection.
pub struct AddNote<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> AddNote<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, content: &str) -> CoreResult<NotesCollection> {
        traced("add_note", self.run(content))
    }

    fn run(&self, content: &str) -> CoreResult<NotesCollection> {
        let note = Note::create(NoteContent::create(content)?);
        let next = self.repo.load()?.add(note)?;
        self.repo.save(&next)?;
        Ok(next)
    }
}

/// Replaces the content of an existing note.
pub struct UpdateNote<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> UpdateNote<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: NoteId, content: &str) -> CoreResult<NotesCollection> {
        traced("update_note", self.run(id, content))
    }

    fn run(&self, id: NoteId, content: &str) -> CoreResult<NotesCollection> {
        let content = NoteContent::create(content)?;
        let next = self.repo.load()?.update_content(id, content)?;
        self.repo.save(&next)?;
        Ok(next)
    }
}

/// Marks a note as archived.
pub struct ArchiveNote<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> ArchiveNote<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: NoteId) -> CoreResult<NotesCollection> {
        traced("archive_note", mutate_and_save(self.repo, |c| c.archive(id)))
    }
}

/// Flips the archived flag of a note.
pub struct ToggleArchived<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> ToggleArchived<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: NoteId) -> CoreResult<NotesCollection> {
        traced(
            "toggle_archived",
            mutate_and_save(self.repo, |c| c.toggle_archived(id)),
        )
    }
}

/// Removes a note.
pub struct DeleteNote<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> DeleteNote<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: NoteId) -> CoreResult<NotesCollection> {
        traced("delete_note", mutate_and_save(self.repo, |c| c.remove(id)))
    }
}

/// Drops every persisted note.
pub struct ClearAllNotes<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> ClearAllNotes<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<()> {
        traced("clear_all_notes", self.repo.clear())
    }
}

/// Reads the persisted collection without mutating it.
pub struct GetAllNotes<'r, R: NotesRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: NotesRepository + ?Sized> GetAllNotes<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<NotesCollection> {
        traced("get_all_notes", self.repo.load())
    }
}

fn mutate_and_save<R: NotesRepository + ?Sized>(
    repo: &R,
    mutate: impl FnOnce(&NotesCollection) -> CoreResult<NotesCollection>,
) -> CoreResult<NotesCollection> {
    let next = mutate(&repo.load()?)?;
    repo.save(&next)?;
    Ok(next)
}

/// Entry points for notes callers.
///
/// Writes run one at a time per service instance, so two in-process calls
/// cannot interleave their load and save. Separate processes sharing the
/// same storage still race with last-write-wins.
pub struct NotesService<R: NotesRepository> {
    repo: R,
    write_lock: Mutex<()>,
}

impl<R: NotesRepository> NotesService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn add_note(&self, content: &str) -> CoreResult<NotesCollection> {
        let _guard = self.write_lock.lock();
        AddNote::new(&self.repo).execute(content)
    }

    pub fn update_note(&self, id: NoteId, content: &str) -> CoreResult<NotesCollection> {
        let _guard = self.write_lock.lock();
        UpdateNote::new(&self.repo).execute(id, content)
    }

    pub fn archive_note(&self, id: NoteId) -> CoreResult<NotesCollection> {
        let _guard = self.write_lock.lock();
        ArchiveNote::new(&self.repo).execute(id)
    }

    pub fn toggle_archived(&self, id: NoteId) -> CoreResult<NotesCollection> {
        let _guard = self.write_lock.lock();
        ToggleArchived::new(&self.repo).execute(id)
    }

    pub fn delete_note(&self, id: NoteId) -> CoreResult<NotesCollection> {
        let _guard = self.write_lock.lock();
        DeleteNote::new(&self.repo).execute(id)
    }

    pub fn clear_all_notes(&self) -> CoreResult<()> {
        let _guard = self.write_lock.lock();
        ClearAllNotes::new(&self.repo).execute()
    }

    pub fn get_all_notes(&self) -> CoreResult<NotesCollection> {
        GetAllNotes::new(&self.repo).execute()
    }
}
