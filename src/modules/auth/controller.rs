use axum::{Json, extract::State};
use tracing::instrument;

use dreamit_core::{AppError, ErrorResponse};
use dreamit_models::Fields;

use super::model::{TokenRequest, TokenResponse};
use super::service::AuthService;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Issue an identity token for the presented claim payload
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed token, valid for one hour by default", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 500, description = "Token could not be signed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, payload))]
pub async fn issue_token(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Fields>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::issue(payload, &state.jwt_config)?;
    Ok(Json(response))
}
