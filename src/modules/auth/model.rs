use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dreamit_models::Fields;

/// Claim payload presented to `POST /jwt`.
///
/// Any JSON object is accepted and embedded verbatim; `email` is the only
/// field the API itself reads back.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "email": "alice@example.com", "name": "Alice" }))]
pub struct TokenRequest {
    pub email: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Fields,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
