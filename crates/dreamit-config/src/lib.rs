//! # dreamit Config
//!
//! Configuration types for the dreamit API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and validity window
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: listening address and feature toggles
//!
//! # Example
//!
//! ```ignore
//! use dreamit_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
