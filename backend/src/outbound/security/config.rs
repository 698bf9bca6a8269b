//! Credential settings parsing and validation.
//!
//! Centralises the environment-driven token and password-hashing settings so
//! they are validated consistently and can be tested with [`mockable::MockEnv`].

use std::path::PathBuf;

use chrono::TimeDelta;
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use super::SigningSecret;

const SECRET_ENV: &str = "SECRET_KEY";
const SECRET_FILE_ENV: &str = "SECRET_KEY_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "ALLOW_EPHEMERAL_SECRET";
const TOKEN_TTL_ENV: &str = "TOKEN_TTL_HOURS";
const HASH_ROUNDS_ENV: &str = "PASSWORD_HASH_ROUNDS";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "a positive number of hours";
const ROUNDS_EXPECTED: &str = "an integer >= 1000";

/// Minimum signing secret length accepted in release builds.
pub const SECRET_MIN_LEN: usize = 32;
/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
/// Default PBKDF2-SHA256 iteration count.
pub const DEFAULT_HASH_ROUNDS: u32 = 600_000;
/// Lowest iteration count accepted from configuration.
pub const MIN_HASH_ROUNDS: u32 = 1_000;

/// Build mode for credential configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for bad values.
    Debug,
    /// Release builds require a real signing secret and valid values.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notes_backend::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Settings for the token issuer and password hasher.
#[derive(Debug, Clone)]
pub struct SecuritySettings {
    /// HMAC key shared by token signing and verification.
    pub signing_secret: SigningSecret,
    /// Lifetime of issued tokens.
    pub token_ttl: TimeDelta,
    /// PBKDF2 iteration count for new password digests.
    pub hash_rounds: u32,
}

/// Errors raised while validating credential configuration.
#[derive(thiserror::Error, Debug)]
pub enum SecurityConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read signing secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("signing secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Build credential settings from environment variables and build mode.
///
/// `SECRET_KEY` wins over `SECRET_KEY_FILE`. Without either, debug builds
/// (or `ALLOW_EPHEMERAL_SECRET=1`) fall back to a random per-process secret,
/// which invalidates every token on restart.
///
/// # Examples
///
/// ```rust
/// use notes_backend::outbound::security::{BuildMode, security_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SECRET_KEY" => Some("k".repeat(32)),
///     "TOKEN_TTL_HOURS" => Some("12".to_owned()),
///     _ => None,
/// });
///
/// let settings = security_settings_from_env(&env, BuildMode::Release).expect("valid");
/// assert_eq!(settings.token_ttl.num_hours(), 12);
/// assert_eq!(settings.hash_rounds, 600_000);
/// ```
pub fn security_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SecuritySettings, SecurityConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let signing_secret = signing_secret_from_env(env, mode, allow_ephemeral)?;
    let token_ttl = token_ttl_from_env(env, mode)?;
    let hash_rounds = hash_rounds_from_env(env, mode)?;

    Ok(SecuritySettings {
        signing_secret,
        token_ttl,
        hash_rounds,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SecurityConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid ALLOW_EPHEMERAL_SECRET; defaulting to disabled");
            Ok(false)
        }
        None => Err(SecurityConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn signing_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<SigningSecret, SecurityConfigError> {
    let fallback_allowed = mode.is_debug() || allow_ephemeral;

    let bytes = match (env.string(SECRET_ENV), env.string(SECRET_FILE_ENV)) {
        (Some(inline), _) if !inline.is_empty() => inline.into_bytes(),
        (_, Some(path)) => {
            let path = PathBuf::from(path);
            match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(error) if fallback_allowed => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "using ephemeral signing secret (dev only)"
                    );
                    return Ok(SigningSecret::generate());
                }
                Err(error) => {
                    return Err(SecurityConfigError::SecretRead {
                        path,
                        source: error,
                    });
                }
            }
        }
        _ if fallback_allowed => {
            warn!("SECRET_KEY not set; using ephemeral signing secret (dev only)");
            return Ok(SigningSecret::generate());
        }
        _ => return Err(SecurityConfigError::MissingEnv { name: SECRET_ENV }),
    };

    check_secret_length(bytes, mode)
}

fn check_secret_length(mut bytes: Vec<u8>, mode: BuildMode) -> Result<SigningSecret, SecurityConfigError> {
    let length = bytes.len();
    if length >= SECRET_MIN_LEN {
        return Ok(SigningSecret::new(bytes));
    }
    if mode.is_debug() && length > 0 {
        warn!(length, min_len = SECRET_MIN_LEN, "signing secret shorter than recommended");
        return Ok(SigningSecret::new(bytes));
    }
    bytes.zeroize();
    Err(SecurityConfigError::SecretTooShort {
        length,
        min_len: SECRET_MIN_LEN,
    })
}

fn token_ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<TimeDelta, SecurityConfigError> {
    let default = TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS);
    let Some(value) = env.string(TOKEN_TTL_ENV) else {
        return Ok(default);
    };
    match value.trim().parse::<u16>() {
        Ok(hours) if hours > 0 => Ok(TimeDelta::hours(i64::from(hours))),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_TTL_HOURS; using default");
            Ok(default)
        }
        _ => Err(SecurityConfigError::InvalidEnv {
            name: TOKEN_TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn hash_rounds_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u32, SecurityConfigError> {
    let Some(value) = env.string(HASH_ROUNDS_ENV) else {
        return Ok(DEFAULT_HASH_ROUNDS);
    };
    match value.trim().parse::<u32>() {
        Ok(rounds) if rounds >= MIN_HASH_ROUNDS => Ok(rounds),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid PASSWORD_HASH_ROUNDS; using default");
            Ok(DEFAULT_HASH_ROUNDS)
        }
        _ => Err(SecurityConfigError::InvalidEnv {
            name: HASH_ROUNDS_ENV,
            value,
            expected: ROUNDS_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
