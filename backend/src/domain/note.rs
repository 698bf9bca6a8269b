//! Note model owned by exactly one user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum note title length in characters.
pub const TITLE_MAX: usize = 100;

/// Validation errors returned by the note newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("content must not be empty")]
    EmptyContent,
}

/// Server-assigned numeric note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Note title: required, non-empty, at most [`TITLE_MAX`] characters.
///
/// The caller's text is stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    pub fn new(raw: impl Into<String>) -> Result<Self, NoteValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if raw.chars().count() > TITLE_MAX {
            return Err(NoteValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for NoteTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Note body: unbounded text that must not be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    pub fn new(raw: impl Into<String>) -> Result<Self, NoteValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for NoteContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted note.
///
/// ## Invariants
/// - `updated_at >= created_at`; both are equal right after creation.
/// - `owner` never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub owner: UserId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a note about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: NoteTitle,
    pub content: NoteContent,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<NoteTitle>,
    pub content: Option<NoteContent>,
}

impl NotePatch {
    /// Apply the patch to a note, stamping the mutation time.
    pub fn apply_to(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        note.updated_at = now;
    }
}

/// Row handed to the note repository on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub owner: UserId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
}
