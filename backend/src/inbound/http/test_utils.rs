//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::TimeDelta;
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::ports::{
    MockIdentityResolver, MockLoginService, MockNotesCommand, MockNotesQuery,
    MockRegistrationService,
};
use crate::domain::{AuthService, CredentialStore, NotesService};
use crate::outbound::memory::{InMemoryNoteRepository, InMemoryUserRepository};
use crate::outbound::security::{
    JwtTokenIssuer, MIN_HASH_ROUNDS, Pbkdf2PasswordHasher, SigningSecret,
};

use super::configure_api;
use super::state::HttpState;

/// State whose only working slot is the identity resolver.
///
/// The remaining ports are mocks without expectations, so a handler that
/// reaches them fails the test loudly.
pub fn state_with_identity(identity: MockIdentityResolver) -> HttpState {
    HttpState {
        registration: Arc::new(MockRegistrationService::new()),
        login: Arc::new(MockLoginService::new()),
        identity: Arc::new(identity),
        notes: Arc::new(MockNotesCommand::new()),
        notes_query: Arc::new(MockNotesQuery::new()),
    }
}

/// Fully wired state over the in-memory adapters and real credential code.
pub fn memory_state() -> HttpState {
    let clock = Arc::new(DefaultClock);
    let credentials = CredentialStore::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(Pbkdf2PasswordHasher::new(MIN_HASH_ROUNDS)),
        clock.clone(),
    );
    let tokens = JwtTokenIssuer::new(
        &SigningSecret::new(b"http-test-signing-secret-0123456789".to_vec()),
        TimeDelta::hours(24),
        clock.clone(),
    );
    let auth = AuthService::new(credentials.clone(), Arc::new(tokens));
    let notes = NotesService::new(Arc::new(InMemoryNoteRepository::default()), clock);
    HttpState::from_services(credentials, auth, notes)
}

/// Application exposing the `/api` routes over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}
