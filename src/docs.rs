use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use dreamit_core::ErrorResponse;
use dreamit_models::{
    AdminStatus, Class, ClassStatus, DeleteResult, InsertOneResult, TeacherStatus, UpdateResult,
    User, UserRole,
};

use crate::modules::auth::{TokenRequest, TokenResponse};
use crate::modules::classes::ClassRequest;
use crate::modules::users::UpsertUserRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::auth::controller::issue_token,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::upsert_user,
        crate::modules::users::controller::promote_to_teacher,
        crate::modules::users::controller::get_admin_status,
        crate::modules::users::controller::get_teacher_status,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes_by_owner,
        crate::modules::classes::controller::approve_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
    ),
    components(
        schemas(
            User,
            UserRole,
            Class,
            ClassStatus,
            AdminStatus,
            TeacherStatus,
            UpdateResult,
            InsertOneResult,
            DeleteResult,
            TokenRequest,
            TokenResponse,
            UpsertUserRequest,
            ClassRequest,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Identity token issuance"),
        (name = "Users", description = "User records and role checks"),
        (name = "Classes", description = "Class records and approval")
    ),
    info(
        title = "dreamit API",
        version = "0.1.0",
        description = "Backend for the dreamit learning platform: identity tokens, users, roles and classes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/jwt",
            "/users",
            "/users/{email}",
            "/users/{id}",
            "/users/admin/{email}",
            "/users/teacher/{email}",
            "/classes",
            "/classes/{email}",
            "/classes/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
