//! Request validation helpers shared by the HTTP handlers.
//!
//! Missing fields are collected so one `400` names all of them; domain
//! validation errors are translated into field-level `details`.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, NoteValidationError, RegistrationValidationError,
    UserValidationError,
};

/// Machine-readable validation codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    Empty,
    TooLong,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::Empty => "empty",
            Self::TooLong => "too_long",
        }
    }
}

/// Accumulates required body fields, treating absent and empty strings
/// alike.
///
/// # Examples
/// ```ignore
/// let mut required = RequiredFields::default();
/// let title = required.take("title", body.title);
/// required.finish("Missing required fields")?;
/// ```
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Return the value of `name`, recording it as missing when absent or
    /// empty.
    pub(crate) fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(present) => present,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Fail with `message` when any field was missing.
    pub(crate) fn finish(self, message: &'static str) -> Result<(), Error> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(Error::invalid_request(message).with_details(json!({
            "fields": self.missing,
            "code": ValidationCode::MissingField.as_str(),
        })))
    }
}

fn field_error(field: &str, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn too_long(field: &str, max: usize, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": ValidationCode::TooLong.as_str(),
        "max": max,
    }))
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyUsername => {
            field_error("username", ValidationCode::Empty, message)
        }
        UserValidationError::UsernameTooLong { max } => too_long("username", max, message),
        UserValidationError::EmptyEmail => field_error("email", ValidationCode::Empty, message),
        UserValidationError::EmailTooLong { max } => too_long("email", max, message),
    }
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::User(inner) => map_user_validation_error(inner),
        RegistrationValidationError::EmptyPassword => field_error(
            "password",
            ValidationCode::Empty,
            "password must not be empty".to_owned(),
        ),
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError, message: &str) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(message).with_details(json!({
        "fields": [field],
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn map_note_validation_error(err: NoteValidationError) -> Error {
    let message = err.to_string();
    match err {
        NoteValidationError::EmptyTitle => field_error("title", ValidationCode::Empty, message),
        NoteValidationError::TitleTooLong { max } => too_long("title", max, message),
        NoteValidationError::EmptyContent => {
            field_error("content", ValidationCode::Empty, message)
        }
    }
}
