use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use dreamit_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::auth::require_auth;
use crate::modules::auth::init_auth_router;
use crate::modules::classes::{init_classes_router, init_public_classes_router};
use crate::modules::health::init_health_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    // No allow_credentials: tower-http panics when it meets a wildcard origin.
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

pub fn init_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_auth);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .merge(init_auth_router())
        .nest("/users", init_users_router().route_layer(auth.clone()))
        .nest(
            "/classes",
            init_public_classes_router().merge(init_classes_router().route_layer(auth)),
        )
        .with_state(state.clone());

    if let Some(handle) = state.metrics.clone() {
        app = app.merge(metrics_app(handle));
    }

    app.layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
