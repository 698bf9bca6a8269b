//! Authentication service: exchanges credentials for tokens and resolves
//! bearer tokens back into accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::ports::{IdentityResolver, LoginService, TokenError, TokenIssuer};
use super::{AccessToken, CredentialStore, Error, LoginCredentials, User, Username};

/// Message for any login failure caused by bad credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Message for any bearer token that fails verification or resolution.
pub const TOKEN_INVALID_MESSAGE: &str = "Token is invalid!";

/// Implements [`LoginService`] and [`IdentityResolver`] on top of the
/// credential store and a token issuer.
#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialStore,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    fn invalid_token(reason: &TokenError) -> Error {
        debug!(%reason, "bearer token rejected");
        Error::unauthorized(TOKEN_INVALID_MESSAGE)
    }
}

#[async_trait]
impl LoginService for AuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        // Names that could never have been registered cannot match an account.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };
        let Some(user) = self.credentials.find_by_username(&username).await? else {
            debug!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };
        if !self
            .credentials
            .verify_password(&user, credentials.password())
            .await
        {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        self.tokens.issue(user.id()).map_err(|err| {
            error!(error = %err, user_id = %user.id(), "token issuance failed");
            Error::internal("token issuance failed")
        })
    }
}

#[async_trait]
impl IdentityResolver for AuthService {
    async fn resolve(&self, token: &str) -> Result<User, Error> {
        let user_id = self
            .tokens
            .verify(token)
            .map_err(|err| Self::invalid_token(&err))?;
        self.credentials
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                debug!(%user_id, "bearer token names a missing account");
                Error::unauthorized(TOKEN_INVALID_MESSAGE)
            })
    }
}
