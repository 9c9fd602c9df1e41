//! Wire records for persisted notes and counter state.
//!
//! # Responsibility
//! - Define the serialized JSON shapes stored under each key.
//! - Map between wire records and domain types.
//!
//! # Invariants
//! - DTOs never leave the repository layer.
//! - Decoding is schema-checked: unknown or missing item fields are rejected
//!   as corrupted records instead of being coerced.

use crate::error::{CoreResult, Failure};
use crate::model::counter::{Counter, CounterId};
use crate::model::note::{Note, NoteId};
use crate::model::notes_collection::NotesCollection;
use crate::model::value::{BoundedCounter, NoteContent, NoteTimestamp};
use serde::{Deserialize, Serialize};

/// `{ "notes": [ ... ] }` as written to storage.
#[derive(Debug, Serialize)]
pub(crate) struct NotesDocumentDto {
    pub notes: Vec<NoteDto>,
}

/// `{ "notes": [ ... ] }` as read from storage; items are decoded one by one.
#[derive(Debug, Deserialize)]
pub(crate) struct RawNotesDocument {
    pub notes: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct NoteDto {
    pub id: String,
    pub content: String,
    /// RFC 3339 instant.
    pub created_at: String,
    /// Absent in records written before archiving existed.
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CounterDto {
    pub value: i64,
}

impl From<&Note> for NoteDto {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            content: note.content().text().to_string(),
            created_at: note.created_at().to_iso8601(),
            archived: note.is_archived(),
        }
    }
}

impl From<&NotesCollection> for NotesDocumentDto {
    fn from(collection: &NotesCollection) -> Self {
        Self {
            notes: collection.iter().map(NoteDto::from).collect(),
        }
    }
}

impl From<&Counter> for CounterDto {
    fn from(counter: &Counter) -> Self {
        Self {
            value: counter.value().number(),
        }
    }
}

/// Decodes one array element into a domain note.
pub(crate) fn note_from_value(value: serde_json::Value) -> CoreResult<Note> {
    let dto: NoteDto = serde_json::from_value(value)
        .map_err(|err| Failure::corrupted(format!("note record shape: {err}")))?;
    note_from_dto(dto)
}

pub(crate) fn note_from_dto(dto: NoteDto) -> CoreResult<Note> {
    let id = dto
        .id
        .parse::<NoteId>()
        .map_err(|_| Failure::corrupted(format!("note id `{}` is not a uuid", dto.id)))?;
    let content = NoteContent::create(&dto.content)
        .map_err(|err| Failure::corrupted(format!("note {id} content: {err}")))?;
    let created_at = NoteTimestamp::parse_iso8601(&dto.created_at)
        .map_err(|err| Failure::corrupted(format!("note {id} createdAt: {err}")))?;
    Ok(Note::restore(id, content, created_at, dto.archived))
}

pub(crate) fn counter_from_dto(dto: CounterDto, id: CounterId) -> CoreResult<Counter> {
    let value = BoundedCounter::create(dto.value)
        .map_err(|err| Failure::corrupted(format!("counter value: {err}")))?;
    Ok(Counter::new(id, value))
}
