//! In-memory [`NoteRepository`] keyed by note id.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteDraft, NoteId, NotePatch, UserId};

#[derive(Debug, Default)]
struct State {
    notes: BTreeMap<NoteId, Note>,
    last_id: i64,
}

/// Note store backed by an ordered map, so listings come out by ascending id.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    state: Mutex<State>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, NotePersistenceError> {
        self.state
            .lock()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let state = self.lock()?;
        Ok(state
            .notes
            .values()
            .filter(|note| note.owner == owner)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let state = self.lock()?;
        Ok(state
            .notes
            .get(&id)
            .filter(|note| note.owner == owner)
            .cloned())
    }

    async fn insert(&self, draft: &NoteDraft) -> Result<Note, NotePersistenceError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let note = Note {
            id: NoteId::new(state.last_id),
            owner: draft.owner,
            title: draft.title.clone(),
            content: draft.content.clone(),
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        patch: &NotePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let mut state = self.lock()?;
        let Some(note) = state.notes.get_mut(&id).filter(|note| note.owner == owner) else {
            return Ok(None);
        };
        patch.apply_to(note, updated_at);
        Ok(Some(note.clone()))
    }

    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError> {
        let mut state = self.lock()?;
        let owned = state.notes.get(&id).is_some_and(|note| note.owner == owner);
        if owned {
            state.notes.remove(&id);
        }
        Ok(owned)
    }
}
