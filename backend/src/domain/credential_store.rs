//! Credential store: registers accounts and looks them up.
//!
//! Wraps the [`UserRepository`] port with password hashing and maps
//! persistence failures onto client-safe domain errors. Plaintext passwords
//! only ever reach the [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use super::ports::{
    PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError, UserRepository,
};
use super::{Error, NewUser, Registration, User, UserId, Username};

/// Message returned when a username or email is already registered.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Map user persistence failures to domain errors safe for clients.
pub(crate) fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Duplicate { .. } => Error::conflict(USER_EXISTS_MESSAGE),
        UserPersistenceError::Connection { message } => {
            error!(%message, "user store unavailable");
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user store query failed");
            Error::internal(message)
        }
    }
}

fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password hashing failed")
}

/// Domain service owning account records.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl CredentialStore {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Hash the password and persist a new account.
    ///
    /// # Errors
    /// - [`super::ErrorCode::Conflict`] when the username or email is taken.
    /// - [`super::ErrorCode::ServiceUnavailable`] or
    ///   [`super::ErrorCode::InternalError`] on storage or hashing failures.
    pub async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        let digest = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_digest: digest,
            created_at: self.clock.utc(),
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user.id())
    }

    /// Look up an account by exact username.
    pub async fn find_by_username(&self, username: &Username) -> Result<Option<User>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)
    }

    /// Look up an account by identifier.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }

    /// Check a plaintext password against the account's stored digest.
    pub async fn verify_password(&self, user: &User, plaintext: &str) -> bool {
        self.hasher.verify(plaintext, user.password_digest()).await
    }
}

#[async_trait]
impl RegistrationService for CredentialStore {
    async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        CredentialStore::register(self, registration).await
    }
}
