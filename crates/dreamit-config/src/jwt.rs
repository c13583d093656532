use std::env;

/// Default validity window of an issued token, in seconds.
pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("ACCESS_TOKEN_SECRET")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_EXPIRY), // 1 hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry_is_one_hour() {
        assert_eq!(DEFAULT_ACCESS_EXPIRY, 60 * 60);
    }

    #[test]
    fn test_config_clone() {
        let config = JwtConfig {
            secret: "secret".to_string(),
            access_token_expiry: 10,
        };
        let cloned = config.clone();
        assert_eq!(cloned.secret, "secret");
        assert_eq!(cloned.access_token_expiry, 10);
    }
}
