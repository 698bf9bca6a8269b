//! PostgreSQL-backed [`NoteRepository`].
//!
//! Every statement filters on both `id` and `user_id`, so a foreign note is
//! never read, changed or removed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{
    Note, NoteContent, NoteDraft, NoteId, NotePatch, NoteTitle, NoteValidationError, UserId,
};

use super::diesel_error_mapping::{map_note_diesel_error, map_note_pool_error};
use super::models::{NewNoteRow, NoteChangeset, NoteRow};
use super::pool::DbPool;
use super::schema::notes;

#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_note(row: NoteRow) -> Result<Note, NotePersistenceError> {
    let NoteRow {
        id,
        user_id,
        title,
        content,
        created_at,
        updated_at,
    } = row;
    let corrupt = |err: NoteValidationError| {
        NotePersistenceError::query(format!("stored note {id}: {err}"))
    };
    Ok(Note {
        id: NoteId::new(id),
        owner: UserId::new(user_id),
        title: NoteTitle::new(title).map_err(corrupt)?,
        content: NoteContent::new(content).map_err(corrupt)?,
        created_at,
        updated_at,
    })
}

fn rows_to_notes(rows: Vec<NoteRow>) -> Result<Vec<Note>, NotePersistenceError> {
    rows.into_iter().map(row_to_note).collect()
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_note_pool_error)?;
        let rows: Vec<NoteRow> = notes::table
            .filter(notes::user_id.eq(owner.as_i64()))
            .select(NoteRow::as_select())
            .order_by(notes::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_note_diesel_error)?;
        rows_to_notes(rows)
    }

    async fn find_owned(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_note_pool_error)?;
        let row: Option<NoteRow> = notes::table
            .filter(notes::id.eq(id.as_i64()))
            .filter(notes::user_id.eq(owner.as_i64()))
            .select(NoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_note_diesel_error)?;
        row.map(row_to_note).transpose()
    }

    async fn insert(&self, draft: &NoteDraft) -> Result<Note, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_note_pool_error)?;
        let row = NewNoteRow {
            user_id: draft.owner.as_i64(),
            title: draft.title.as_ref(),
            content: draft.content.as_ref(),
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        let stored: NoteRow = diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_note_diesel_error)?;
        row_to_note(stored)
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: UserId,
        patch: &NotePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_note_pool_error)?;
        let changeset = NoteChangeset {
            title: patch.title.as_ref().map(AsRef::as_ref),
            content: patch.content.as_ref().map(AsRef::as_ref),
            updated_at,
        };
        let row: Option<NoteRow> = diesel::update(
            notes::table
                .filter(notes::id.eq(id.as_i64()))
                .filter(notes::user_id.eq(owner.as_i64())),
        )
        .set(&changeset)
        .returning(NoteRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_note_diesel_error)?;
        row.map(row_to_note).transpose()
    }

    async fn delete_owned(&self, id: NoteId, owner: UserId) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_note_pool_error)?;
        let removed = diesel::delete(
            notes::table
                .filter(notes::id.eq(id.as_i64()))
                .filter(notes::user_id.eq(owner.as_i64())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_note_diesel_error)?;
        Ok(removed > 0)
    }
}
