//! Note entity.
//!
//! # Responsibility
//! - Bind a stable identity to validated content and a creation instant.
//! - Expose behavior as methods returning new notes.
//!
//! # Invariants
//! - `id` and `created_at` never change across the note lifetime.
//! - Equality and hashing use `id` only.

use super::value::{NoteContent, NoteTimestamp, ValidationError};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Stable note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Identity-bearing note.
#[derive(Debug, Clone)]
pub struct Note {
    id: NoteId,
    content: NoteContent,
    created_at: NoteTimestamp,
    archived: bool,
}

impl Note {
    /// Creates a new, unarchived note with a generated id and current time.
    pub fn create(content: NoteContent) -> Self {
        Self {
            id: NoteId::generate(),
            content,
            created_at: NoteTimestamp::now(),
            archived: false,
        }
    }

    /// Rebuilds a note from previously persisted parts.
    pub fn restore(
        id: NoteId,
        content: NoteContent,
        created_at: NoteTimestamp,
        archived: bool,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            archived,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn content(&self) -> &NoteContent {
        &self.content
    }

    pub fn created_at(&self) -> NoteTimestamp {
        self.created_at
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns a copy with freshly validated content.
    pub fn update_content(&self, raw: &str) -> Result<Self, ValidationError> {
        Ok(self.with_content(NoteContent::create(raw)?))
    }

    /// Returns a copy carrying already validated content.
    pub fn with_content(&self, content: NoteContent) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }

    /// Returns the archived form of this note.
    pub fn archived(&self) -> Self {
        Self {
            archived: true,
            ..self.clone()
        }
    }

    /// Returns the active (unarchived) form of this note.
    pub fn unarchived(&self) -> Self {
        Self {
            archived: false,
            ..self.clone()
        }
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
