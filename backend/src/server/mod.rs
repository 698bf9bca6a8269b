//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use notes_backend::Trace;
#[cfg(debug_assertions)]
use notes_backend::doc::ApiDoc;
use notes_backend::inbound::http::configure_api;
use notes_backend::inbound::http::cors::CorsSettings;
use notes_backend::inbound::http::health::{HealthState, live, ready};
use notes_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors: &CorsSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(cors.middleware())
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flipped once the listener is bound. Signal handling is left to
/// the caller so liveness can fail before the server drains; see [`drain_on`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        security,
        db_pool,
        cors,
    } = config;
    let http_state = web::Data::new(build_http_state(&security, db_pool.as_ref()));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), &cors)
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `signal`, fail the liveness check, then run `stop`.
///
/// `stop` is expected to drain in-flight requests, e.g. a graceful
/// [`actix_web::dev::ServerHandle::stop`].
pub async fn drain_on<S, F>(
    signal: S,
    health_state: web::Data<HealthState>,
    stop: impl FnOnce() -> F,
) where
    S: Future<Output = ()>,
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    stop().await;
}
