use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use dreamit::logging::init_tracing;
use dreamit::metrics::init_metrics;
use dreamit::router::init_router;
use dreamit::shutdown::shutdown_signal;
use dreamit::state::AppState;
use dreamit_config::ServerConfig;
use dreamit_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    let metrics = init_metrics(server_config.metrics_enabled)?;
    let state = AppState::from_pool(pool.clone()).with_metrics(metrics);
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Database pool closed");

    Ok(())
}
