//! Note endpoints. Every handler takes [`AuthenticatedUser`] as its first
//! extractor.
//!
//! Actix polls a handler's extractors together, in argument order. A missing
//! or malformed `Authorization` header therefore fails on the first poll and
//! wins over any body or path error, but a token whose verification is still
//! pending can lose to a body that fails to parse first.
//!
//! ```text
//! GET    /api/notes
//! POST   /api/notes       {"title":"T","content":"C"}
//! GET    /api/notes/{id}
//! PUT    /api/notes/{id}  {"content":"C2"}
//! DELETE /api/notes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewNote, Note, NoteContent, NoteId, NotePatch, NoteTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{MISSING_FIELDS_MESSAGE, MessageResponse};
use crate::inbound::http::validation::{RequiredFields, map_note_validation_error};

pub const NOTE_DELETED_MESSAGE: &str = "Note deleted";

/// Note as returned to its owner.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NoteResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Groceries", max_length = 100)]
    pub title: String,
    #[schema(example = "Milk, eggs")]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        let Note {
            id,
            title,
            content,
            created_at,
            updated_at,
            ..
        } = note;
        Self {
            id: id.as_i64(),
            title: title.as_ref().to_owned(),
            content: content.as_ref().to_owned(),
            created_at,
            updated_at,
        }
    }
}

/// Body for creating a note. Both fields are required.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial update body; omitted fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<UpdateNoteRequest> for NotePatch {
    type Error = Error;

    fn try_from(body: UpdateNoteRequest) -> Result<Self, Self::Error> {
        let title = body
            .title
            .map(NoteTitle::new)
            .transpose()
            .map_err(map_note_validation_error)?;
        let content = body
            .content
            .map(NoteContent::new)
            .transpose()
            .map_err(map_note_validation_error)?;
        Ok(Self { title, content })
    }
}

/// List the caller's notes in ascending id order.
#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "Notes owned by the caller", body = [NoteResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let notes = state.notes_query.list(user.id()).await?;
    Ok(web::Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Fetch one of the caller's notes.
#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such note for this caller", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "getNote"
)]
#[get("/notes/{id}")]
pub async fn get_note(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NoteResponse>> {
    let id = NoteId::new(path.into_inner());
    let note = state.notes_query.get(user.id(), id).await?;
    Ok(web::Json(note.into()))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/notes")]
pub async fn create_note(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let CreateNoteRequest { title, content } = payload.into_inner();
    let mut required = RequiredFields::default();
    let title = required.take("title", title);
    let content = required.take("content", content);
    required.finish(MISSING_FIELDS_MESSAGE)?;

    let note = NewNote {
        title: NoteTitle::new(title).map_err(map_note_validation_error)?,
        content: NoteContent::new(content).map_err(map_note_validation_error)?,
    };
    let created = state.notes.create(user.id(), note).await?;
    Ok(HttpResponse::Created().json(NoteResponse::from(created)))
}

/// Update the title and/or content of one of the caller's notes.
///
/// An empty body still counts as a mutation and advances `updated_at`.
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 400, description = "Invalid field value", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such note for this caller", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "updateNote"
)]
#[put("/notes/{id}")]
pub async fn update_note(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateNoteRequest>,
) -> ApiResult<web::Json<NoteResponse>> {
    let id = NoteId::new(path.into_inner());
    let patch = NotePatch::try_from(payload.into_inner())?;
    let updated = state.notes.update(user.id(), id, patch).await?;
    Ok(web::Json(updated.into()))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such note for this caller", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = NoteId::new(path.into_inner());
    state.notes.delete(user.id(), id).await?;
    Ok(web::Json(MessageResponse::new(NOTE_DELETED_MESSAGE)))
}

#[cfg(test)]
mod tests;
