use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use dreamit_config::{CorsConfig, JwtConfig};
use dreamit_db::{ClassStore, PgClassStore, PgPool, PgUserStore, UserStore};

/// Shared state handed to every handler.
///
/// The stores are trait objects so the same router runs against PostgreSQL
/// in production and against the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub classes: Arc<dyn ClassStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        classes: Arc<dyn ClassStore>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users,
            classes,
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    /// PostgreSQL-backed state with configuration read from the environment.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgClassStore::new(pool)),
            JwtConfig::from_env(),
            CorsConfig::from_env(),
        )
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
