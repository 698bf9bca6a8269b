//! Ownership enforcement for note-scoped operations.
//!
//! Lookups always use the compound `(note id, owner)` predicate, so a note
//! owned by another user is reported exactly like a missing one.

use tracing::error;

use super::ports::{NotePersistenceError, NoteRepository};
use super::{Error, Note, NoteId, UserId};

/// Message returned whenever a note is absent or owned by someone else.
pub const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found";

pub(crate) fn note_not_found() -> Error {
    Error::not_found(NOTE_NOT_FOUND_MESSAGE)
}

/// Map note persistence failures to domain errors safe for clients.
pub(crate) fn map_note_persistence_error(err: NotePersistenceError) -> Error {
    match err {
        NotePersistenceError::Connection { message } => {
            error!(%message, "note store unavailable");
            Error::service_unavailable("note store unavailable")
        }
        NotePersistenceError::Query { message } => {
            error!(%message, "note store query failed");
            Error::internal(message)
        }
    }
}

/// Return the note identified by `note_id` only if `owner` owns it.
///
/// # Errors
/// [`super::ErrorCode::NotFound`] when the note does not exist or belongs to
/// another user; storage failures map to service-unavailable or internal
/// errors.
pub async fn authorize_note_access(
    owner: UserId,
    note_id: NoteId,
    notes: &dyn NoteRepository,
) -> Result<Note, Error> {
    notes
        .find_owned(note_id, owner)
        .await
        .map_err(map_note_persistence_error)?
        .ok_or_else(note_not_found)
}
