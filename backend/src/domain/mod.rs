//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed account and note model together with
//! the authentication core (credential store, authentication service,
//! ownership enforcement). Nothing here depends on actix or Diesel; adapters
//! reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Note and their validated newtypes.
//! - CredentialStore, AuthService, NotesService: use-case implementations.

pub mod auth;
pub mod auth_service;
pub mod credential_store;
pub mod error;
pub mod note;
pub mod notes_service;
pub mod ownership;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError,
};
pub use self::auth_service::{AuthService, INVALID_CREDENTIALS_MESSAGE, TOKEN_INVALID_MESSAGE};
pub use self::credential_store::{CredentialStore, USER_EXISTS_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{
    NewNote, Note, NoteContent, NoteDraft, NoteId, NotePatch, NoteTitle, NoteValidationError,
    TITLE_MAX,
};
pub use self::notes_service::NotesService;
pub use self::ownership::{NOTE_NOT_FOUND_MESSAGE, authorize_note_access};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, PasswordDigest, USERNAME_MAX, User, UserId,
    UserValidationError, Username,
};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
