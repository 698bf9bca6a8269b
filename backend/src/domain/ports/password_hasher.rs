//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a password digest.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its inputs or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The blocking worker running the hash did not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// Digests are self-describing: the algorithm, iteration count and salt are
/// encoded alongside the hash so verification needs nothing else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `plaintext` against `digest`.
    ///
    /// Never errors: a mismatch, a malformed digest or an unsupported
    /// algorithm all yield `false`.
    async fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool;
}
