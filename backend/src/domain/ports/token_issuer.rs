//! Port for minting and checking signed identity tokens.
use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    ///
    /// Callers facing clients collapse every verification variant into a
    /// single "invalid token" response; the detail is for server logs.
    pub enum TokenError {
        /// Signing the claim set failed.
        Encoding { message: String } => "token encoding failed: {message}",
        /// Signature, header or payload did not check out.
        Invalid { message: String } => "token rejected: {message}",
        /// The token's expiry instant has passed.
        Expired => "token expired",
    }
}

/// Issues and verifies time-limited bearer tokens.
///
/// Verification is pure CPU work and never blocks, so the trait is
/// synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Mint a token naming `user_id`, valid for the configured lifetime.
    fn issue(&self, user_id: UserId) -> Result<AccessToken, TokenError>;

    /// Recover the user id from a token, rejecting anything not signed by
    /// this issuer with the expected algorithm or already expired.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
