use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dreamit::router::init_router;
use dreamit::state::AppState;
use dreamit_auth::issue_token;
use dreamit_config::{CorsConfig, JwtConfig};
use dreamit_db::MemoryStore;
use dreamit_models::{User, UserChanges, UserRole};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        store,
    }
}

/// A valid token whose claim carries `email`.
pub fn token_for(email: &str) -> String {
    let payload = serde_json::json!({ "email": email })
        .as_object()
        .cloned()
        .unwrap();
    issue_token(payload, &jwt_config()).unwrap()
}

#[allow(dead_code)]
pub async fn seed_user(store: &MemoryStore, email: &str, role: Option<UserRole>) -> User {
    let mut user = User::new(email, UserChanges::default());
    user.role = role;
    store.put_user(user.clone()).await;
    user
}

/// Sends a request and returns the status with the body parsed as JSON
/// (`Value::Null` when the body is not JSON).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[allow(dead_code)]
pub fn assert_unauthorized(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "unAuthorized user");
}

#[allow(dead_code)]
pub fn assert_forbidden(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "forbidden access");
}
