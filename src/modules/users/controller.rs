use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use dreamit_core::{AppError, ErrorResponse};
use dreamit_models::{AdminStatus, Fields, TeacherStatus, UpdateResult, User, UserId};

use super::model::UpsertUserRequest;
use super::service::UserService;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(state.users.as_ref()).await?;
    Ok(Json(users))
}

/// Create or update the user with the given email
#[utoipa::path(
    put,
    path = "/users/{email}",
    params(
        ("email" = String, Path, description = "Email keying the user record")
    ),
    request_body = UpsertUserRequest,
    responses(
        (status = 200, description = "Upsert result", body = UpdateResult),
        (status = 400, description = "Body is not a JSON object or carries an unknown role", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Writing another user or a role without being an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, body))]
pub async fn upsert_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
    JsonBody(body): JsonBody<Fields>,
) -> Result<Json<UpdateResult>, AppError> {
    let result =
        UserService::upsert_user(state.users.as_ref(), auth_user.claims(), &email, body).await?;
    Ok(Json(result))
}

/// Promote a user to teacher
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User record identifier")
    ),
    responses(
        (status = 200, description = "Update result; matchedCount is 0 for an unknown id", body = UpdateResult),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _admin))]
pub async fn promote_to_teacher(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>, AppError> {
    let id = UserId::from_path(&id)?;
    let result = UserService::promote_to_teacher(state.users.as_ref(), id).await?;
    Ok(Json(result))
}

/// Check whether the caller is an admin
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    params(
        ("email" = String, Path, description = "Email to check; must be the caller's own")
    ),
    responses(
        (status = 200, description = "Admin flag; always false when asking about another email", body = AdminStatus),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_admin_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let status = UserService::admin_status(state.users.as_ref(), auth_user.claims(), &email).await?;
    Ok(Json(status))
}

/// Check whether the caller is a teacher
#[utoipa::path(
    get,
    path = "/users/teacher/{email}",
    params(
        ("email" = String, Path, description = "Email to check; must be the caller's own")
    ),
    responses(
        (status = 200, description = "Teacher flag; always false when asking about another email", body = TeacherStatus),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_teacher_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<TeacherStatus>, AppError> {
    let status =
        UserService::teacher_status(state.users.as_ref(), auth_user.claims(), &email).await?;
    Ok(Json(status))
}
