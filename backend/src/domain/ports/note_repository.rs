//! Port abstraction for note persistence adapters and their errors.
//!
//! Every lookup and mutation is keyed on the compound `(note id, owner)`
//! predicate. A note that exists but belongs to someone else is
//! indistinguishable from one that does not exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Note, NoteDraft, NoteId, NotePatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes owned by `owner`, ordered by ascending id.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// The note with `id` if and only if it belongs to `owner`.
    async fn find_owned(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<Option<Note>, NotePersistenceError>;

    /// Store a new note; `created_at` doubles as the initial `updated_at`.
    async fn insert(&self, draft: &NoteDraft) -> Result<Note, NotePersistenceError>;

    /// Apply `patch` to the owned note and stamp `updated_at`.
    ///
    /// Returns `None` when no note matches `(id, owner)`.
    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        patch: &NotePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError>;

    /// Remove the owned note; `false` when no note matches `(id, owner)`.
    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError>;
}
