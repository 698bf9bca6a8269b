//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cors;
pub mod error;
pub mod health;
pub mod notes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope with its body and path error handlers.
///
/// The caller supplies `web::Data<HttpState>` and, for `/api/health`,
/// `web::Data<HealthState>`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use notes_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
            .service(users::register)
            .service(users::login)
            .service(health::health_report)
            .service(notes::list_notes)
            .service(notes::create_note)
            .service(notes::get_note)
            .service(notes::update_note)
            .service(notes::delete_note),
    );
}
