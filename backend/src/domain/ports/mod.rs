//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenIssuer`],
//! [`ProcessMonitor`]) are implemented by outbound adapters. Driving ports ([`LoginService`],
//! [`RegistrationService`], [`IdentityResolver`], [`NotesCommand`],
//! [`NotesQuery`]) are implemented by domain services and consumed by the
//! HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_resolver;
mod login_service;
mod note_repository;
mod notes_command;
mod notes_query;
mod password_hasher;
mod process_monitor;
mod registration_service;
mod token_issuer;
mod user_repository;

pub use identity_resolver::IdentityResolver;
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NotePersistenceError, NoteRepository};
#[cfg(test)]
pub use notes_command::MockNotesCommand;
pub use notes_command::NotesCommand;
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use process_monitor::MockProcessMonitor;
pub use process_monitor::{ProcessMonitor, ProcessStats, ProcessStatsError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
