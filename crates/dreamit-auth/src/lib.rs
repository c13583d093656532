//! # dreamit Auth
//!
//! Identity tokens for the dreamit API.
//!
//! This crate provides:
//!
//! - [`claims`]: the signed identity claim, an arbitrary JSON object plus timestamps
//! - [`jwt`]: token issuance, verification and `Authorization` header parsing
//!
//! A token only proves *which* email is asking. What that identity may do is
//! decided from the stored user record, never from the token.
//!
//! # Example
//!
//! ```ignore
//! use dreamit_auth::{issue_token, verify_token};
//! use dreamit_config::JwtConfig;
//! use serde_json::json;
//!
//! let config = JwtConfig::from_env();
//! let payload = json!({ "email": "alice@example.com" });
//!
//! let token = issue_token(payload.as_object().unwrap().clone(), &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.email(), Some("alice@example.com"));
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::IdentityClaims;
pub use jwt::{bearer_token, issue_token, verify_token};
