//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use notes_backend::inbound::http::cors::CorsSettings;
use notes_backend::outbound::persistence::DbPool;
use notes_backend::outbound::security::SecuritySettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) security: SecuritySettings,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors: CorsSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, security: SecuritySettings) -> Self {
        Self {
            bind_addr,
            security,
            db_pool: None,
            cors: CorsSettings::default(),
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without one the server stores accounts and notes in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the default allow-any-origin CORS policy.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsSettings) -> Self {
        self.cors = cors;
        self
    }
}
