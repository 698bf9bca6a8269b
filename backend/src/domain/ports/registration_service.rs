//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account, failing with a conflict when the username or email
    /// is already taken.
    async fn register(&self, registration: &Registration) -> Result<UserId, Error>;
}
