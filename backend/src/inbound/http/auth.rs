//! Bearer-token guard for protected endpoints.
//!
//! [`AuthenticatedUser`] is an actix extractor: listing it as a handler
//! argument runs the check before the handler body and short-circuits with
//! `401` when the token is absent, malformed, expired or names a deleted
//! account.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, TOKEN_INVALID_MESSAGE, User, UserId};

use super::state::HttpState;

/// Message returned when no bearer token accompanies a protected request.
pub const TOKEN_MISSING_MESSAGE: &str = "Token is missing!";

const BEARER_SCHEME: &str = "bearer";

/// Account resolved from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0.id()
    }

    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let Some(raw) = req.headers().get(AUTHORIZATION) else {
        debug!("authorization header absent");
        return Err(Error::unauthorized(TOKEN_MISSING_MESSAGE));
    };
    let Ok(raw) = raw.to_str() else {
        debug!("authorization header is not visible ASCII");
        return Err(Error::unauthorized(TOKEN_INVALID_MESSAGE));
    };
    let mut parts = raw.split_whitespace();
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        debug!("authorization header has no token part");
        return Err(Error::unauthorized(TOKEN_MISSING_MESSAGE));
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || parts.next().is_some() {
        debug!(scheme, "unsupported authorization scheme");
        return Err(Error::unauthorized(TOKEN_INVALID_MESSAGE));
    }
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = token?;
            let user = state.identity.resolve(&token).await?;
            Ok(Self(user))
        })
    }
}
