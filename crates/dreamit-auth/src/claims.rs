//! Identity claim carried inside a signed token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims embedded in an identity token.
///
/// `payload` holds whatever JSON object the client presented at issuance,
/// flattened next to the registered `exp`/`iat` claims. It is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Caller-supplied fields, minimally an `email`
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl IdentityClaims {
    /// Keys owned by the token itself; never copied from a caller payload.
    pub const REGISTERED: [&'static str; 2] = ["exp", "iat"];

    pub fn new(mut payload: Map<String, Value>, iat: usize, exp: usize) -> Self {
        for key in Self::REGISTERED {
            payload.remove(key);
        }
        Self { payload, exp, iat }
    }

    /// The email this token speaks for, if the payload carried one.
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }

    /// True when the token's email equals `email` exactly.
    pub fn is_identity(&self, email: &str) -> bool {
        self.email() == Some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_claims_serialize_flat() {
        let claims = IdentityClaims::new(
            payload(json!({ "email": "alice@example.com", "name": "Alice" })),
            1234567800,
            1234567890,
        );
        let serialized = serde_json::to_value(&claims).unwrap();
        assert_eq!(serialized["email"], "alice@example.com");
        assert_eq!(serialized["name"], "Alice");
        assert_eq!(serialized["exp"], 1234567890);
        assert_eq!(serialized["iat"], 1234567800);
    }

    #[test]
    fn test_claims_deserialize_splits_registered() {
        let json = r#"{"email":"user@test.com","exp":9999999999,"iat":9999999900}"#;
        let claims: IdentityClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.email(), Some("user@test.com"));
        assert_eq!(claims.exp, 9999999999);
        assert_eq!(claims.iat, 9999999900);
        assert!(!claims.payload.contains_key("exp"));
    }

    #[test]
    fn test_new_drops_caller_timestamps() {
        let claims = IdentityClaims::new(
            payload(json!({ "email": "a@b.c", "exp": 1, "iat": 1 })),
            100,
            200,
        );
        assert_eq!(claims.exp, 200);
        assert_eq!(claims.iat, 100);
        assert_eq!(claims.payload.len(), 1);
    }

    #[test]
    fn test_email_must_be_string() {
        let claims = IdentityClaims::new(payload(json!({ "email": 42 })), 0, 1);
        assert_eq!(claims.email(), None);
        assert!(!claims.is_identity("42"));
    }

    #[test]
    fn test_is_identity() {
        let claims = IdentityClaims::new(payload(json!({ "email": "alice@example.com" })), 0, 1);
        assert!(claims.is_identity("alice@example.com"));
        assert!(!claims.is_identity("mallory@example.com"));
    }
}
