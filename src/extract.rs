//! Request body extraction.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use dreamit_core::AppError;

/// JSON body whose rejections render as the common error body.
///
/// axum's own `Json` rejection answers in plain text; this wrapper keeps
/// every 4xx in the `{ "error": true, "message": ... }` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(_) => {
            format!("Invalid request body: {}", rejection.body_text())
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
        _ => "Invalid request body".to_string(),
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection_message(&rejection))))?;

        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use dreamit_models::Fields;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_object() {
        let JsonBody(fields) = JsonBody::<Fields>::from_request(json_request(r#"{"a":1}"#), &())
            .await
            .unwrap();
        assert_eq!(fields["a"], 1);
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let err = JsonBody::<Fields>::from_request(json_request("[1,2]"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let err = JsonBody::<Fields>::from_request(json_request("{"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Malformed JSON in request body");
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();
        let err = JsonBody::<Fields>::from_request(request, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
