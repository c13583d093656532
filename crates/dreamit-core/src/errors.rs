//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. The error carries the HTTP
//! status it maps to and an [`anyhow::Error`] with the message sent to the
//! client. All error bodies share one shape:
//!
//! ```json
//! { "error": true, "message": "unAuthorized user" }
//! ```

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Message returned for every rejected token or missing header.
pub const UNAUTHORIZED_MESSAGE: &str = "unAuthorized user";

/// Message returned when the caller's stored role does not allow the action.
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// JSON body written for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Missing, malformed, forged or expired credentials.
    ///
    /// The client always sees [`UNAUTHORIZED_MESSAGE`]; the reason is only logged.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        tracing::debug!(reason = %reason, "rejecting request as unauthorized");
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(UNAUTHORIZED_MESSAGE))
    }

    /// Authenticated caller whose stored role does not permit the action.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        tracing::debug!(reason = %reason, "rejecting request as forbidden");
        Self::new(StatusCode::FORBIDDEN, anyhow!(FORBIDDEN_MESSAGE))
    }

    /// A record identifier in the path could not be parsed.
    pub fn invalid_identifier(raw: &str) -> Self {
        Self::bad_request(anyhow!("invalid identifier: {}", raw))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "request failed");
        }

        let body = Json(ErrorResponse {
            error: true,
            message: self.error.to_string(),
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_body_hides_reason() {
        let response = AppError::unauthorized("token expired").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "unAuthorized user");
    }

    #[tokio::test]
    async fn test_forbidden_body() {
        let response = AppError::forbidden("teacher tried to approve a class").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["message"], FORBIDDEN_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_bad_request() {
        let response = AppError::invalid_identifier("not-an-id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "invalid identifier: not-an-id");
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow!("connection reset").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
