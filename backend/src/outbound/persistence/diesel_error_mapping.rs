//! Diesel and pool error translation shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{NotePersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation { constraint: Option<String> },
}

pub(super) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        _ => DieselFailure::Query("database error"),
    }
}

pub(super) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

pub(super) fn map_note_pool_error(error: PoolError) -> NotePersistenceError {
    NotePersistenceError::connection(error.into_message())
}

pub(super) fn map_user_diesel_error(error: DieselError) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::UniqueViolation { constraint } => {
            UserPersistenceError::duplicate(duplicate_field(constraint.as_deref()))
        }
    }
}

pub(super) fn map_note_diesel_error(error: DieselError) -> NotePersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => NotePersistenceError::connection(message),
        DieselFailure::Query(message) => NotePersistenceError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            NotePersistenceError::query("unexpected unique violation")
        }
    }
}

/// Name the user column a unique constraint guards (`users_email_key` etc.).
fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("email") => "email",
        _ => "username",
    }
}
