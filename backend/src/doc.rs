//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request/response bodies and
//! the domain error wrappers from [`crate::inbound::http::schemas`], plus the
//! bearer-token security scheme. Swagger UI serves it at `/docs` in debug
//! builds and `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::health::{HealthReport, ProcessReport};
use crate::inbound::http::notes::{CreateNoteRequest, NoteResponse, UpdateNoteRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginRequest, MessageResponse, RegisterRequest, TokenResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME_NAME: &str = "BearerAuth";

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME_NAME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes backend API",
        description = "Multi-user notes with bearer-token authentication and per-owner isolation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::health::health_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        MessageResponse,
        TokenResponse,
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        HealthReport,
        ProcessReport,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "notes", description = "Notes owned by the authenticated caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
