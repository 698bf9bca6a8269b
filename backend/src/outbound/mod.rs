//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel and `diesel-async`.
//! - **memory**: process-local repositories for development and tests.
//! - **security**: PBKDF2 password hashing and HS256 token issuance.
//! - **system**: process statistics for the health report.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
pub mod system;
