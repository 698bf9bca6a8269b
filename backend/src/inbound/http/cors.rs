//! Cross-origin resource sharing for browser clients.
//!
//! Every origin is allowed unless `CORS_ALLOWED_ORIGINS` names a
//! comma-separated list of origins.

use actix_cors::Cors;
use actix_web::http::{Method, header};
use mockable::Env;
use tracing::warn;

const ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Origins permitted to call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

/// CORS policy applied to every route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsSettings {
    pub allowed_origins: AllowedOrigins,
}

impl CorsSettings {
    /// Settings restricted to `origins`.
    #[must_use]
    pub fn with_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: AllowedOrigins::List(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Build the middleware for these settings.
    ///
    /// # Examples
    /// ```no_run
    /// use actix_web::App;
    /// use notes_backend::inbound::http::cors::CorsSettings;
    ///
    /// let app = App::new().wrap(CorsSettings::default().middleware());
    /// ```
    #[must_use]
    pub fn middleware(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(PREFLIGHT_MAX_AGE_SECS);

        match &self.allowed_origins {
            AllowedOrigins::Any => cors.allow_any_origin(),
            AllowedOrigins::List(origins) => origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        }
    }
}

/// Read the CORS policy from `CORS_ALLOWED_ORIGINS`.
///
/// An unset or empty variable, or `*`, allows any origin. Entries that are
/// not valid header values are skipped with a warning.
///
/// # Examples
/// ```rust
/// use mockable::MockEnv;
/// use notes_backend::inbound::http::cors::{AllowedOrigins, cors_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(|_| Some("https://a.example, https://b.example".to_owned()));
///
/// let settings = cors_settings_from_env(&env);
/// assert_eq!(
///     settings.allowed_origins,
///     AllowedOrigins::List(vec!["https://a.example".into(), "https://b.example".into()])
/// );
/// ```
pub fn cors_settings_from_env<E: Env>(env: &E) -> CorsSettings {
    let Some(raw) = env.string(ALLOWED_ORIGINS_ENV) else {
        return CorsSettings::default();
    };

    let mut origins = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        if entry == "*" {
            return CorsSettings::default();
        }
        if header::HeaderValue::from_str(entry).is_err() {
            warn!(origin = entry, "ignoring invalid {ALLOWED_ORIGINS_ENV} entry");
            continue;
        }
        origins.push(entry.to_owned());
    }

    if origins.is_empty() {
        CorsSettings::default()
    } else {
        CorsSettings::with_origins(origins)
    }
}
