use crate::server::state::ApiState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use confhub_derive::{api_handler, api_model};
use confhub_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::warn;

#[api_model]
/// Service health
struct HealthResponse {
    /// `up` or `degraded`
    status: &'static str,
    /// Crate version
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
    /// Whether the database answered its health probe
    database: bool,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service is healthy", body = HealthResponse),
        (status = SERVICE_UNAVAILABLE, description = "Database unreachable", body = HealthResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let database = match state.database.health().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health probe failed");
            false
        },
    };

    let (status, label) =
        if database { (StatusCode::OK, "up") } else { (StatusCode::SERVICE_UNAVAILABLE, "degraded") };

    let body = HealthResponse {
        status: label,
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
        database,
    };

    (
        status,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
