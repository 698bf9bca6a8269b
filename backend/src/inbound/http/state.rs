//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised with in-memory adapters or mocks.

use std::sync::Arc;

use crate::domain::ports::{
    IdentityResolver, LoginService, NotesCommand, NotesQuery, RegistrationService,
};
use crate::domain::{AuthService, CredentialStore, NotesService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub identity: Arc<dyn IdentityResolver>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
}

impl HttpState {
    /// Wire the domain services into the port slots.
    ///
    /// `auth` serves both login and token resolution; `notes` serves both
    /// note reads and writes.
    pub fn from_services(
        credentials: CredentialStore,
        auth: AuthService,
        notes: NotesService,
    ) -> Self {
        let auth = Arc::new(auth);
        let notes = Arc::new(notes);
        Self {
            registration: Arc::new(credentials),
            login: auth.clone(),
            identity: auth,
            notes: notes.clone(),
            notes_query: notes,
        }
    }
}
