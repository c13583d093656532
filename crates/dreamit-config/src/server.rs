//! HTTP server configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listening port (default `5000`)
//! - `METRICS_ENABLED`: expose the Prometheus endpoint (default `true`)
//! - `LOG_DIR`: directory for rolling JSON logs (default `storage/logs`)

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_enabled: bool,
    pub log_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            metrics_enabled: true,
            log_dir: "storage/logs".to_string(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            metrics_enabled: env::var("METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.metrics_enabled),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }

    /// Address passed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
