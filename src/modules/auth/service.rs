use tracing::info;

use dreamit_auth::issue_token;
use dreamit_config::JwtConfig;
use dreamit_core::AppError;
use dreamit_models::Fields;

use super::model::TokenResponse;
use crate::metrics::track_token_issued;

pub struct AuthService;

impl AuthService {
    /// Signs the presented payload. No credential is checked here; what the
    /// token's email may do is decided against the user store later.
    pub fn issue(payload: Fields, jwt_config: &JwtConfig) -> Result<TokenResponse, AppError> {
        let email = payload
            .get("email")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let token = issue_token(payload, jwt_config)?;
        track_token_issued();
        info!(email = ?email, "Issued identity token");

        Ok(TokenResponse { token })
    }
}
