//! Self-validating value objects.
//!
//! # Responsibility
//! - Own the primitive-level invariants shared by notes and the counter.
//! - Provide validating constructors that report failures as values.
//!
//! # Invariants
//! - `BoundedCounter::number()` is never negative.
//! - `NoteContent::text()` is trimmed and holds 1..=500 chars.
//! - Every instance is immutable; behavior returns new instances.

use chrono::{DateTime, SecondsFormat, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum note length, counted in Unicode scalar values after trimming.
pub const NOTE_CONTENT_MAX_CHARS: usize = 500;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Value-object validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Counter construction with a negative number.
    NegativeCounter(i64),
    /// Note content is empty after trimming.
    EmptyContent,
    /// Note content exceeds the maximum length after trimming.
    ContentTooLong { len: usize, max: usize },
    /// Timestamp text is not a valid RFC 3339 instant.
    InvalidTimestamp(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeCounter(value) => {
                write!(f, "counter value must be >= 0, got {value}")
            }
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::ContentTooLong { len, max } => {
                write!(f, "note content is {len} chars; maximum is {max}")
            }
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Non-negative counter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedCounter {
    number: i64,
}

impl BoundedCounter {
    /// Validates and wraps a raw counter number.
    pub fn create(number: i64) -> Result<Self, ValidationError> {
        if number < 0 {
            return Err(ValidationError::NegativeCounter(number));
        }
        Ok(Self { number })
    }

    /// Counter at zero.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn number(self) -> i64 {
        self.number
    }

    /// Returns the next value. Saturates at `i64::MAX`.
    pub fn increment(self) -> Self {
        Self {
            number: self.number.saturating_add(1),
        }
    }

    /// Returns the previous value, or the same value when already at zero.
    ///
    /// Decrementing at zero is a floor, not an error.
    pub fn decrement(self) -> Self {
        if self.number == 0 {
            return self;
        }
        Self {
            number: self.number - 1,
        }
    }
}

/// Trimmed, length-bounded note text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteContent {
    text: String,
}

impl NoteContent {
    /// Trims `raw` and validates its length.
    ///
    /// # Errors
    /// - `EmptyContent` when nothing remains after trimming.
    /// - `ContentTooLong` when the trimmed text exceeds 500 chars.
    pub fn create(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let len = trimmed.chars().count();
        if len > NOTE_CONTENT_MAX_CHARS {
            return Err(ValidationError::ContentTooLong {
                len,
                max: NOTE_CONTENT_MAX_CHARS,
            });
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for NoteContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Creation instant of a note.
///
/// Captured once when a note is created; never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteTimestamp {
    instant: DateTime<Utc>,
}

impl NoteTimestamp {
    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Fixed-width `YYYY-MM-DD HH:MM` rendering in UTC.
    pub fn formatted(&self) -> String {
        self.instant.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Human-readable elapsed time relative to the current clock.
    pub fn relative(&self) -> String {
        self.relative_to(Utc::now())
    }

    /// Human-readable elapsed time relative to `now`.
    ///
    /// Buckets: `just now` (< 1 minute, or in the future), minutes (< 1 hour),
    /// hours (< 1 day), then days.
    pub fn relative_to(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.instant).num_seconds();
        if elapsed < SECONDS_PER_MINUTE {
            return "just now".to_string();
        }
        if elapsed < SECONDS_PER_HOUR {
            return plural_ago(elapsed / SECONDS_PER_MINUTE, "minute");
        }
        if elapsed < SECONDS_PER_DAY {
            return plural_ago(elapsed / SECONDS_PER_HOUR, "hour");
        }
        plural_ago(elapsed / SECONDS_PER_DAY, "day")
    }

    /// RFC 3339 UTC text with as many sub-second digits as needed.
    pub fn to_iso8601(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parses RFC 3339 text with any offset, normalized to UTC.
    pub fn parse_iso8601(value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|parsed| Self::from_instant(parsed.with_timezone(&Utc)))
            .map_err(|_| ValidationError::InvalidTimestamp(value.to_string()))
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
