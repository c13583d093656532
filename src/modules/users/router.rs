use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    get_admin_status, get_teacher_status, get_users, promote_to_teacher, upsert_user,
};
use crate::state::AppState;

/// User routes. Every route here requires a token; the caller layers
/// `require_auth` over the whole router.
///
/// `PUT` and `PATCH` share the `/{id}` segment: the upsert reads it as an
/// email, the promotion as a record identifier.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", put(upsert_user).patch(promote_to_teacher))
        .route("/admin/{email}", get(get_admin_status))
        .route("/teacher/{email}", get(get_teacher_status))
}
