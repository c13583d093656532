//! JWT (JSON Web Token) utilities for authentication.
//!
//! Tokens are HS256-signed with the process-wide secret from [`JwtConfig`]
//! and expire after `JwtConfig::access_token_expiry` seconds. There is no
//! refresh flow: once a token expires the client asks for a new one.
//!
//! # Example
//!
//! ```ignore
//! use dreamit_auth::{bearer_token, verify_token};
//!
//! let token = bearer_token("Bearer eyJhbGciOi...").unwrap();
//! let claims = verify_token(token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use dreamit_config::JwtConfig;
use dreamit_core::AppError;

use crate::claims::IdentityClaims;

/// Signs `payload` into an identity token.
///
/// The payload is embedded verbatim except for `exp` and `iat`, which are
/// always computed here.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn issue_token(
    payload: Map<String, Value>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0);

    let claims = IdentityClaims::new(payload, now as usize, exp as usize);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, was signed with
/// another key, or has expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<IdentityClaims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {}", e)))
}

/// Extracts the token from an `Authorization` header value.
///
/// The token is the second whitespace-separated segment; the scheme word in
/// front of it is not inspected.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_issue_token_success() {
        let config = get_test_jwt_config();
        let token = issue_token(payload(json!({ "email": "test@example.com" })), &config).unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_verify_token_returns_payload() {
        let config = get_test_jwt_config();
        let token = issue_token(
            payload(json!({ "email": "test@example.com", "name": "Test", "photo": null })),
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.email(), Some("test@example.com"));
        assert_eq!(claims.payload["name"], "Test");
        assert!(claims.payload["photo"].is_null());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_caller_cannot_extend_expiry() {
        let config = get_test_jwt_config();
        let token = issue_token(
            payload(json!({ "email": "test@example.com", "exp": 99999999999u64 })),
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let result = verify_token("invalid-token", &config);
        assert_eq!(result.unwrap_err().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = issue_token(payload(json!({ "email": "test@example.com" })), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        let result = verify_token(&token, &wrong_config);
        assert_eq!(result.unwrap_err().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_verify_token_expired() {
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: -120,
        };
        let token = issue_token(payload(json!({ "email": "test@example.com" })), &config).unwrap();

        let result = verify_token(&token, &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_bearer_token_second_segment() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Token abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer   spaced"), Some("spaced"));
    }

    #[test]
    fn test_bearer_token_missing_segment() {
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token(""), None);
    }
}
