//! Health endpoints: liveness and readiness checks for orchestrators, plus a
//! JSON status report for humans and uptime monitors.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::{ProcessMonitor, ProcessStats};

pub const HEALTHY_STATUS: &str = "healthy";
pub const HEALTHY_MESSAGE: &str = "Server is running normally";
pub const ERROR_STATUS: &str = "error";

/// Shared health state for readiness and liveness checks.
///
/// The process starts live but not ready; the server marks it ready once the
/// listener is bound and unhealthy once shutdown begins.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    started_at: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    monitor: Arc<dyn ProcessMonitor>,
}

impl HealthState {
    pub fn new(monitor: Arc<dyn ProcessMonitor>) -> Self {
        Self::with_clock(Arc::new(DefaultClock), monitor)
    }

    /// Start the uptime counter from `clock`'s current time.
    pub fn with_clock(clock: Arc<dyn Clock>, monitor: Arc<dyn ProcessMonitor>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            started_at: clock.utc(),
            clock,
            monitor,
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Whole seconds elapsed since start; zero if the clock went backwards.
    fn uptime_seconds(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.started_at).num_seconds()).unwrap_or(0)
    }

    fn report(&self) -> Result<HealthReport, HealthReport> {
        let now = self.clock.utc();
        match self.monitor.sample() {
            Ok(stats) => Ok(HealthReport {
                status: HEALTHY_STATUS.to_owned(),
                timestamp: now,
                uptime_seconds: Some(self.uptime_seconds(now)),
                process: Some(stats.into()),
                message: HEALTHY_MESSAGE.to_owned(),
            }),
            Err(error) => {
                warn!(%error, "health report could not sample the process");
                Err(HealthReport {
                    status: ERROR_STATUS.to_owned(),
                    timestamp: now,
                    uptime_seconds: None,
                    process: None,
                    message: format!("Error checking server health: {error}"),
                })
            }
        }
    }

    fn status_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Resource usage block of [`HealthReport`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ProcessReport {
    #[schema(example = 1.5)]
    pub cpu_percent: f32,
    #[schema(example = 0.8)]
    pub memory_percent: f32,
    #[schema(example = 12)]
    pub threads: usize,
}

impl From<ProcessStats> for ProcessReport {
    fn from(stats: ProcessStats) -> Self {
        Self {
            cpu_percent: stats.cpu_percent,
            memory_percent: stats.memory_percent,
            threads: stats.threads,
        }
    }
}

/// Body of `GET /api/health`.
///
/// `uptime_seconds` and `process` are omitted when `status` is `error`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HealthReport {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 42)]
    pub uptime_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessReport>,
    #[schema(example = "Server is running normally")]
    pub message: String,
}

/// Readiness check. Return 200 once the listener is bound; 503 before that.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_ready())
}

/// Liveness check. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_alive())
}

/// Status report with the current time, process uptime and resource usage.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server status", body = HealthReport),
        (status = 503, description = "Process statistics could not be read", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health_report(state: web::Data<HealthState>) -> HttpResponse {
    let (mut response, report) = match state.report() {
        Ok(report) => (HttpResponse::Ok(), report),
        Err(report) => (HttpResponse::ServiceUnavailable(), report),
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}
