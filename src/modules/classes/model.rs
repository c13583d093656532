use serde::Deserialize;
use utoipa::ToSchema;

use dreamit_models::{ClassStatus, Fields};

/// Body of `POST /classes` and `PATCH /classes/{id}`.
///
/// `email` names the owning teacher and defaults to the caller on insert.
/// `status` is ignored on insert and needs an admin on patch.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Watercolor Basics", "price": 49, "seats": 20 }))]
pub struct ClassRequest {
    pub email: Option<String>,
    pub status: Option<ClassStatus>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub details: Fields,
}
