//! PBKDF2-SHA256 implementation of the [`PasswordHasher`] port.
//!
//! Digests use the PHC string format (`$pbkdf2-sha256$i=...,l=32$salt$hash`)
//! so the iteration count and salt travel with the hash. Hashing runs on the
//! blocking pool because a single derivation takes tens of milliseconds at
//! the default iteration count.

use async_trait::async_trait;
use pbkdf2::password_hash::{
    PasswordHash, PasswordHasher as PhcHasher, PasswordVerifier, SaltString,
};
use pbkdf2::{Params, Pbkdf2};
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordDigest, TraceId};

const SALT_LEN: usize = 16;
const OUTPUT_LEN: usize = 32;

/// Salted PBKDF2-SHA256 password hasher.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2PasswordHasher {
    rounds: u32,
}

impl Pbkdf2PasswordHasher {
    /// Create a hasher producing digests with `rounds` iterations.
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }
}

fn hash_blocking(password: &[u8], rounds: u32) -> Result<PasswordDigest, PasswordHashError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt)
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
    let params = Params {
        rounds,
        output_length: OUTPUT_LEN,
    };
    let hash = Pbkdf2
        .hash_password_customized(password, None, None, params, &salt)
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
    Ok(PasswordDigest::new(hash.to_string()))
}

fn verify_blocking(password: &[u8], digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Pbkdf2.verify_password(password, &parsed).is_ok()
}

#[async_trait]
impl PasswordHasher for Pbkdf2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError> {
        let password = Zeroizing::new(plaintext.as_bytes().to_vec());
        let rounds = self.rounds;
        TraceId::spawn_blocking(move || hash_blocking(&password, rounds))
            .await
            .map_err(|err| PasswordHashError::worker(err.to_string()))?
    }

    async fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        let password = Zeroizing::new(plaintext.as_bytes().to_vec());
        let digest = digest.as_str().to_owned();
        match TraceId::spawn_blocking(move || verify_blocking(&password, &digest)).await {
            Ok(matched) => matched,
            Err(err) => {
                warn!(error = %err, "password verification worker failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const TEST_ROUNDS: u32 = 1_000;

    #[fixture]
    fn hasher() -> Pbkdf2PasswordHasher {
        Pbkdf2PasswordHasher::new(TEST_ROUNDS)
    }

    #[rstest]
    #[tokio::test]
    async fn digest_is_self_describing(hasher: Pbkdf2PasswordHasher) {
        let digest = hasher.hash("hunter2").await.expect("hash");
        assert!(digest.as_str().starts_with("$pbkdf2-sha256$"));
        assert!(digest.as_str().contains("i=1000"));
        assert!(!digest.as_str().contains("hunter2"));
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_verifies(hasher: Pbkdf2PasswordHasher) {
        let digest = hasher.hash("hunter2").await.expect("hash");
        assert!(hasher.verify("hunter2", &digest).await);
        assert!(!hasher.verify("hunter3", &digest).await);
    }

    #[rstest]
    #[tokio::test]
    async fn same_password_gets_fresh_salt(hasher: Pbkdf2PasswordHasher) {
        let first = hasher.hash("pw").await.expect("hash");
        let second = hasher.hash("pw").await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn digest_from_other_round_count_still_verifies(hasher: Pbkdf2PasswordHasher) {
        let digest = Pbkdf2PasswordHasher::new(2_000)
            .hash("pw")
            .await
            .expect("hash");
        assert!(hasher.verify("pw", &digest).await);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-digest")]
    #[case("pbkdf2:sha256:1000$salt$deadbeef")]
    #[case("$argon2id$v=19$m=16,t=2,p=1$c2FsdHNhbHQ$aGFzaA")]
    #[tokio::test]
    async fn malformed_or_foreign_digest_is_a_mismatch(
        hasher: Pbkdf2PasswordHasher,
        #[case] digest: &str,
    ) {
        assert!(!hasher.verify("pw", &PasswordDigest::new(digest)).await);
    }
}
