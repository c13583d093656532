//! # dreamit DB
//!
//! Database pool, migrations and record stores for the dreamit API.
//!
//! Handlers never talk SQL directly: they go through the [`UserStore`] and
//! [`ClassStore`] traits, backed in production by [`PgUserStore`] and
//! [`PgClassStore`]. With the `test-utils` feature the crate also exposes an
//! in-memory [`MemoryStore`] implementing both.
//!
//! # Example
//!
//! ```ignore
//! use dreamit_db::{init_db_pool, run_migrations, PgUserStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool().await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserStore::new(pool.clone());
//!     Ok(())
//! }
//! ```

use std::env;

use anyhow::{Context, anyhow};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::{PgClassStore, PgUserStore};
pub use store::{ClassStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Resolves the connection string.
///
/// `DATABASE_URL` wins. Otherwise the URL is assembled from `DB_USER`,
/// `DB_PASS`, `DB_HOST` (default `localhost`) and `DB_NAME` (default
/// `dreamit`).
pub fn database_url_from_env() -> anyhow::Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let user = env::var("DB_USER").map_err(|_| anyhow!("DATABASE_URL or DB_USER must be set"))?;
    let pass = env::var("DB_PASS").unwrap_or_default();
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let name = env::var("DB_NAME").unwrap_or_else(|_| "dreamit".to_string());

    Ok(format!("postgres://{}:{}@{}/{}", user, pass, host, name))
}

/// Initializes the PostgreSQL connection pool and checks it with a ping.
///
/// The pool is sized by `DB_MAX_CONNECTIONS` (default 10). It is acquired
/// once at startup, shared through application state, and closed by the
/// caller after the server drains.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = database_url_from_env()?;
    let max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    ping(&pool).await?;
    info!(max_connections, "Connected to database");

    Ok(pool)
}

/// Round-trips a trivial query.
pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Database ping failed")?;
    Ok(())
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations applied");
    Ok(())
}
