//! Note use-cases executed on behalf of an authenticated owner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ownership::{authorize_note_access, map_note_persistence_error, note_not_found};
use super::ports::{NoteRepository, NotesCommand, NotesQuery};
use super::{Error, NewNote, Note, NoteDraft, NoteId, NotePatch, UserId};

/// Implements [`NotesCommand`] and [`NotesQuery`] over a [`NoteRepository`].
#[derive(Clone)]
pub struct NotesService {
    notes: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
}

impl NotesService {
    pub fn new(notes: Arc<dyn NoteRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { notes, clock }
    }
}

#[async_trait]
impl NotesQuery for NotesService {
    async fn list(&self, owner: UserId) -> Result<Vec<Note>, Error> {
        self.notes
            .list_for_owner(owner)
            .await
            .map_err(map_note_persistence_error)
    }

    async fn get(&self, owner: UserId, id: NoteId) -> Result<Note, Error> {
        authorize_note_access(owner, id, self.notes.as_ref()).await
    }
}

#[async_trait]
impl NotesCommand for NotesService {
    async fn create(&self, owner: UserId, note: NewNote) -> Result<Note, Error> {
        let NewNote { title, content } = note;
        let draft = NoteDraft {
            owner,
            title,
            content,
            created_at: self.clock.utc(),
        };
        let created = self
            .notes
            .insert(&draft)
            .await
            .map_err(map_note_persistence_error)?;
        info!(note_id = %created.id, user_id = %owner, "note created");
        Ok(created)
    }

    async fn update(&self, owner: UserId, id: NoteId, patch: NotePatch) -> Result<Note, Error> {
        self.notes
            .update_owned(id, owner, &patch, self.clock.utc())
            .await
            .map_err(map_note_persistence_error)?
            .ok_or_else(note_not_found)
    }

    async fn delete(&self, owner: UserId, id: NoteId) -> Result<(), Error> {
        let deleted = self
            .notes
            .delete_owned(id, owner)
            .await
            .map_err(map_note_persistence_error)?;
        if !deleted {
            return Err(note_not_found());
        }
        info!(note_id = %id, user_id = %owner, "note deleted");
        Ok(())
    }
}
