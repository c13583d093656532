use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// True when any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_allows_any_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
        };
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_explicit_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        };
        assert!(!config.allows_any_origin());
    }
}
