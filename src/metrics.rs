use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use anyhow::Context;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

use dreamit_models::UserRole;

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when metrics are disabled. Without a recorder every macro
/// below is a no-op.
pub fn init_metrics(enabled: bool) -> anyhow::Result<Option<PrometheusHandle>> {
    if !enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Records count, latency and in-flight gauge per request.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Scrape endpoint at `/metrics`.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_token_issued() {
    counter!("jwt_tokens_issued_total").increment(1);
}

pub fn track_authorization_check(allowed: bool, required: UserRole) {
    let status = if allowed { "allowed" } else { "denied" };
    counter!("authorization_checks_total", "role" => required.as_str(), "status" => status)
        .increment(1);
}

pub fn track_user_promoted(role: UserRole) {
    counter!("user_promotions_total", "role" => role.as_str()).increment(1);
}

pub fn track_class_created() {
    counter!("classes_created_total").increment(1);
}

pub fn track_class_approved() {
    counter!("classes_approved_total").increment(1);
}
