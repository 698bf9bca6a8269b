//! HS256 JWT implementation of the [`TokenIssuer`] port.
//!
//! Claims carry `user_id`, `iat` and `exp` (seconds since the epoch). Expiry
//! is checked against the injected [`Clock`] with zero leeway, so a token is
//! rejected from the exact second its lifetime ends.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::SigningSecret;
use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HMAC-SHA256 signed bearer tokens.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &SigningSecret, ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: UserId) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            user_id: user_id.as_i64(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(UserId::new(data.claims.user_id))
    }
}
