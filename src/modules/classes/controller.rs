use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use dreamit_core::{AppError, ErrorResponse};
use dreamit_models::{Class, ClassId, DeleteResult, Fields, InsertOneResult, UpdateResult};

use super::model::ClassRequest;
use super::service::ClassService;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;

/// List all classes
#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "Every stored class", body = Vec<Class>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(State(state): State<AppState>) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::get_classes(state.classes.as_ref()).await?;
    Ok(Json(classes))
}

/// Create a class
#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Insert result; the class starts out pending", body = InsertOneResult),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user, body))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(body): JsonBody<Fields>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result = ClassService::create_class(state.classes.as_ref(), auth_user.claims(), body).await?;
    Ok(Json(result))
}

/// List the classes owned by an email
#[utoipa::path(
    get,
    path = "/classes/{email}",
    params(
        ("email" = String, Path, description = "Owner email")
    ),
    responses(
        (status = 200, description = "Classes owned by the email", body = Vec<Class>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes_by_owner(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::get_classes_by_owner(state.classes.as_ref(), &email).await?;
    Ok(Json(classes))
}

/// Approve a class
#[utoipa::path(
    put,
    path = "/classes/{id}",
    params(
        ("id" = String, Path, description = "Class record identifier")
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
    tag = "Classes"
)]
#[instrument(skip(state, _admin))]
pub async fn approve_class(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>, AppError> {
    let id = ClassId::from_path(&id)?;
    let result = ClassService::approve_class(state.classes.as_ref(), id).await?;
    Ok(Json(result))
}

/// Update a class
#[utoipa::path(
    patch,
    path = "/classes/{id}",
    params(
        ("id" = String, Path, description = "Class record identifier")
    ),
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Update result; matchedCount is 0 for an unknown id", body = UpdateResult),
        (status = 400, description = "Malformed identifier or body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Changing status without being an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user, body))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Fields>,
) -> Result<Json<UpdateResult>, AppError> {
    let id = ClassId::from_path(&id)?;
    let result = ClassService::update_class(
        state.classes.as_ref(),
        state.users.as_ref(),
        auth_user.claims(),
        id,
        body,
    )
    .await?;
    Ok(Json(result))
}

/// Delete a class
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(
        ("id" = String, Path, description = "Class record identifier")
    ),
    responses(
        (status = 200, description = "Delete result; deletedCount is 0 for an unknown id", body = DeleteResult),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let id = ClassId::from_path(&id)?;
    let result = ClassService::delete_class(state.classes.as_ref(), id).await?;
    Ok(Json(result))
}
