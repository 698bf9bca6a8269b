//! Credential adapters: PBKDF2 password hashing and HS256 bearer tokens.
//!
//! Both adapters share settings loaded by [`security_settings_from_env`]; the
//! signing secret is held in zeroizing memory and never printed.

pub mod config;
mod jwt_token_issuer;
mod pbkdf2_hasher;

use std::fmt;

use rand::RngCore;
use zeroize::Zeroizing;

pub use config::{
    BuildMode, DEFAULT_HASH_ROUNDS, DEFAULT_TOKEN_TTL_HOURS, MIN_HASH_ROUNDS, SECRET_MIN_LEN,
    SecurityConfigError, SecuritySettings, security_settings_from_env,
};
pub use jwt_token_issuer::JwtTokenIssuer;
pub use pbkdf2_hasher::Pbkdf2PasswordHasher;

const EPHEMERAL_SECRET_LEN: usize = 64;

/// HMAC key material for token signing.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Wrap caller-supplied key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generate a random per-process secret.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; EPHEMERAL_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
