//! Liveness probe.

use axum::{Router, routing::get};

use crate::state::AppState;

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Process is up", body = String, content_type = "text/plain")
    ),
    tag = "Health"
)]
pub async fn health() -> &'static str {
    "Server running"
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/", get(health))
}
