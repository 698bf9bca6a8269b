//! Shared helpers for the backend integration tests.
//!
//! Each file under `tests/` compiles as its own crate, so helpers used by
//! more than one suite live here.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;
