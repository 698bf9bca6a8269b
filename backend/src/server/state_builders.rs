//! Builders wiring adapters into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use notes_backend::domain::ports::{NoteRepository, UserRepository};
use notes_backend::domain::{AuthService, CredentialStore, NotesService};
use notes_backend::inbound::http::state::HttpState;
use notes_backend::outbound::memory::{InMemoryNoteRepository, InMemoryUserRepository};
use notes_backend::outbound::persistence::{DbPool, DieselNoteRepository, DieselUserRepository};
use notes_backend::outbound::security::{JwtTokenIssuer, Pbkdf2PasswordHasher, SecuritySettings};

fn build_repositories(
    pool: Option<&DbPool>,
) -> (Arc<dyn UserRepository>, Arc<dyn NoteRepository>) {
    match pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselNoteRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; accounts and notes are kept in memory");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryNoteRepository::new()),
            )
        }
    }
}

/// Assemble the HTTP state from the security settings and optional pool.
pub(crate) fn build_http_state(security: &SecuritySettings, pool: Option<&DbPool>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (users, notes) = build_repositories(pool);
    let credentials = CredentialStore::new(
        users,
        Arc::new(Pbkdf2PasswordHasher::new(security.hash_rounds)),
        clock.clone(),
    );
    let tokens = JwtTokenIssuer::new(&security.signing_secret, security.token_ttl, clock.clone());
    let auth = AuthService::new(credentials.clone(), Arc::new(tokens));
    HttpState::from_services(credentials, auth, NotesService::new(notes, clock))
}
