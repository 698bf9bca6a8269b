//! Backend entry-point: parses the command line, loads credential settings,
//! connects storage and serves the REST API.

mod server;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notes_backend::inbound::http::cors::cors_settings_from_env;
use notes_backend::inbound::http::health::HealthState;
use notes_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use notes_backend::outbound::security::{BuildMode, security_settings_from_env};
use notes_backend::outbound::system::SysinfoProcessMonitor;
use server::{ServerConfig, create_server, drain_on};

/// Multi-user notes API server.
#[derive(Debug, Parser)]
#[command(name = "notes-backend", version, about)]
struct Cli {
    /// Interface to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    /// Port to listen on.
    #[arg(long, default_value_t = 5000)]
    port: u16,
    /// Apply development tolerances (ephemeral secret, default fallbacks).
    #[arg(long)]
    debug: bool,
    /// PostgreSQL connection string; in-memory storage is used when absent.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

impl Cli {
    fn build_mode(&self) -> BuildMode {
        if self.debug {
            BuildMode::Debug
        } else {
            BuildMode::from_debug_assertions()
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let env = DefaultEnv::new();
    let security =
        security_settings_from_env(&env, cli.build_mode()).map_err(std::io::Error::other)?;
    let bind_addr = SocketAddr::new(cli.host, cli.port);
    let mut config =
        ServerConfig::new(bind_addr, security).with_cors(cors_settings_from_env(&env));

    if let Some(database_url) = cli.database_url.as_deref() {
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new(Arc::new(SysinfoProcessMonitor::new())));
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, move || async move {
        handle.stop(true).await;
    }));
    info!(%bind_addr, "listening");
    server.await
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
