//! Driving port for note mutations performed on behalf of an owner.

use async_trait::async_trait;

use crate::domain::{Error, NewNote, Note, NoteId, NotePatch, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note owned by `owner`.
    async fn create(&self, owner: UserId, note: NewNote) -> Result<Note, Error>;

    /// Partially update an owned note; not found when `owner` does not own it.
    async fn update(&self, owner: UserId, id: NoteId, patch: NotePatch) -> Result<Note, Error>;

    /// Delete an owned note; not found when `owner` does not own it.
    async fn delete(&self, owner: UserId, id: NoteId) -> Result<(), Error>;
}
