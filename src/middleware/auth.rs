use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use dreamit_auth::{IdentityClaims, bearer_token, verify_token};
use dreamit_config::JwtConfig;
use dreamit_core::AppError;

use crate::state::AppState;

/// The verified identity claim of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub IdentityClaims);

impl AuthUser {
    /// The email the token speaks for.
    pub fn email(&self) -> Option<&str> {
        self.0.email()
    }

    pub fn claims(&self) -> &IdentityClaims {
        &self.0
    }
}

/// Verifies the `Authorization` header of a request.
///
/// The token is the second whitespace-separated segment of the header; the
/// scheme word is not checked.
pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<IdentityClaims, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Authorization header is not valid ASCII"))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| AppError::unauthorized("Authorization header carries no token"))?;

    verify_token(token, jwt_config)
}

/// Rejects requests without a valid token and attaches the claim for
/// downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        // Route mounted without `require_auth`
        authenticate(&parts.headers, &state.jwt_config).map(AuthUser)
    }
}
