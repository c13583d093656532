use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    approve_class, create_class, delete_class, get_classes, get_classes_by_owner, update_class,
};
use crate::state::AppState;

/// Routes open to anonymous callers.
pub fn init_public_classes_router() -> Router<AppState> {
    Router::new().route("/", get(get_classes))
}

/// Routes that require a token; the caller layers `require_auth` over them.
///
/// `GET /{id}` reads the segment as an owner email, the other methods as a
/// class identifier.
pub fn init_classes_router() -> Router<AppState> {
    Router::new().route("/", post(create_class)).route(
        "/{id}",
        get(get_classes_by_owner)
            .put(approve_class)
            .patch(update_class)
            .delete(delete_class),
    )
}
