//! Driving port for reading an owner's notes.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Every note owned by `owner`, ascending by id.
    async fn list(&self, owner: UserId) -> Result<Vec<Note>, Error>;

    /// A single owned note; not found when `owner` does not own it.
    async fn get(&self, owner: UserId, id: NoteId) -> Result<Note, Error>;
}
