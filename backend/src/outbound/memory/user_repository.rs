//! In-memory [`UserRepository`] enforcing username and email uniqueness.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, Username};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    last_id: i64,
}

/// Account store backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.username() == &user.username) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        if state.users.iter().any(|u| u.email() == &user.email) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        state.last_id += 1;
        let stored = User::new(
            UserId::new(state.last_id),
            user.username.clone(),
            user.email.clone(),
            user.password_digest.clone(),
            user.created_at,
        );
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock()?;
        Ok(state
            .users
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock()?;
        Ok(state.users.iter().find(|u| u.id() == id).cloned())
    }
}
