//! Multi-user notes backend.
//!
//! Layout follows a hexagonal split: [`domain`] holds the model, services and
//! ports; [`outbound`] implements the driven ports (PostgreSQL, in-memory,
//! credential primitives); [`inbound::http`] exposes the REST surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
