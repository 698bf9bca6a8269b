//! Driving port used by the request guard to turn a bearer token into an
//! authenticated account.

use async_trait::async_trait;

use crate::domain::{Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Verify `token` and load the account it names.
    ///
    /// Bad signatures, malformed payloads, expired tokens and tokens naming
    /// a deleted account all fail with the same unauthorised error.
    async fn resolve(&self, token: &str) -> Result<User, Error>;
}
