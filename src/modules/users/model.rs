use serde::Deserialize;
use utoipa::ToSchema;

use dreamit_models::{Fields, UserRole};

/// Body of `PUT /users/{email}`.
///
/// Every key is merged into the stored record. `_id` and `email` are
/// ignored; `role` may only be sent by an admin.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Alice", "photo": "https://example.com/alice.png" }))]
pub struct UpsertUserRequest {
    pub role: Option<UserRole>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub profile: Fields,
}
