//! Notes aggregate root.
//!
//! # Responsibility
//! - Be the only place where the notes sequence is mutated.
//! - Enforce collection-level invariants on every operation.
//!
//! # Invariants
//! - No two items share an id.
//! - `len() <= capacity()`.
//! - Items keep insertion order; in-place replacements keep position.
//! - Every operation returns either a new collection or a documented failure.

use super::note::{Note, NoteId};
use super::value::NoteContent;
use crate::error::{CoreResult, Failure};

/// Default maximum number of notes held by one collection.
pub const DEFAULT_NOTES_CAPACITY: usize = 100;

/// Immutable, ordered collection of unique notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesCollection {
    items: Vec<Note>,
    capacity: usize,
}

impl Default for NotesCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl NotesCollection {
    /// Empty collection with the default capacity.
    pub fn empty() -> Self {
        Self::with_capacity(DEFAULT_NOTES_CAPACITY)
    }

    /// Empty collection with a caller-provided capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Read-only view of the items in insertion order.
    pub fn items(&self) -> &[Note] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.items.iter().find(|note| note.id() == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a note.
    ///
    /// Capacity is checked before uniqueness, so a full collection reports
    /// `CapacityExceeded` even for an id that already exists.
    pub fn add(&self, note: Note) -> CoreResult<Self> {
        if self.is_full() {
            return Err(Failure::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.contains(note.id()) {
            return Err(Failure::DuplicateId { id: note.id() });
        }

        let mut items = self.items.clone();
        items.push(note);
        Ok(self.with_items(items))
    }

    /// Removes the note with `id`.
    pub fn remove(&self, id: NoteId) -> CoreResult<Self> {
        let position = self.position(id)?;
        let mut items = self.items.clone();
        items.remove(position);
        Ok(self.with_items(items))
    }

    /// Replaces the note with `id` by its archived form, keeping its position.
    ///
    /// Archiving an already archived note succeeds without changes.
    pub fn archive(&self, id: NoteId) -> CoreResult<Self> {
        self.replace(id, Note::archived)
    }

    /// Replaces the note with `id` by its unarchived form.
    pub fn unarchive(&self, id: NoteId) -> CoreResult<Self> {
        self.replace(id, Note::unarchived)
    }

    /// Flips the archived flag of the note with `id`.
    pub fn toggle_archived(&self, id: NoteId) -> CoreResult<Self> {
        self.replace(id, |note| {
            if note.is_archived() {
                note.unarchived()
            } else {
                note.archived()
            }
        })
    }

    /// Replaces the content of the note with `id`.
    pub fn update_content(&self, id: NoteId, content: NoteContent) -> CoreResult<Self> {
        self.replace(id, |note| note.with_content(content.clone()))
    }

    /// Empty collection with the same capacity.
    pub fn cleared(&self) -> Self {
        self.with_items(Vec::new())
    }

    fn replace(&self, id: NoteId, f: impl FnOnce(&Note) -> Note) -> CoreResult<Self> {
        let position = self.position(id)?;
        let mut items = self.items.clone();
        items[position] = f(&self.items[position]);
        Ok(self.with_items(items))
    }

    fn position(&self, id: NoteId) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|note| note.id() == id)
            .ok_or(Failure::NotFound { id })
    }

    fn with_items(&self, items: Vec<Note>) -> Self {
        Self {
            items,
            capacity: self.capacity,
        }
    }
}

impl<'a> IntoIterator for &'a NotesCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
