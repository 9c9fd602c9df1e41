//! Failure taxonomy shared by every core layer.
//!
//! # Invariants
//! - Every fallible core API returns `CoreResult<T>`.
//! - Layers pass failures upward unchanged; no variant is re-wrapped.

use crate::model::note::NoteId;
use crate::model::value::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, Failure>;

/// Typed failure returned as the error arm of every core result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Input rejected before any I/O.
    Validation(ValidationError),
    /// Referenced note does not exist in the collection.
    NotFound { id: NoteId },
    /// A note with the same id is already present.
    DuplicateId { id: NoteId },
    /// The collection is full.
    CapacityExceeded { capacity: usize },
    /// Storage read/write or serialization failure.
    Storage { message: String },
    /// Persisted data could not be decoded.
    CorruptedRecord { message: String },
}

impl Failure {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedRecord {
            message: message.into(),
        }
    }

    /// Stable snake_case code for logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::Storage { .. } => "storage_error",
            Self::CorruptedRecord { .. } => "corrupted_record",
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { id } => write!(f, "note not found: {id}"),
            Self::DuplicateId { id } => write!(f, "note id already exists: {id}"),
            Self::CapacityExceeded { capacity } => {
                write!(f, "notes collection is full (capacity {capacity})")
            }
            Self::Storage { message } => write!(f, "storage failure: {message}"),
            Self::CorruptedRecord { message } => write!(f, "corrupted record: {message}"),
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
