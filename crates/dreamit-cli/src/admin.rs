//! Administrator bootstrap.
//!
//! The API only lets admins grant roles, so the first admin has to be created
//! out of band.

use anyhow::{Context, Result};
use serde_json::Value;

use dreamit_db::UserStore;
use dreamit_models::{Fields, UpdateResult, UserChanges, UserRole};

/// Creates the user `email` as an admin, or promotes the existing record.
pub async fn create_admin(
    users: &dyn UserStore,
    email: &str,
    name: Option<String>,
) -> Result<UpdateResult> {
    let mut fields = Fields::new();
    if let Some(name) = name {
        fields.insert("name".to_string(), Value::String(name));
    }

    users
        .upsert_by_email(
            email,
            UserChanges {
                role: Some(Some(UserRole::Admin)),
                fields,
            },
        )
        .await
        .with_context(|| format!("Failed to create admin {}", email))
}
