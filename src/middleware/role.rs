//! Admin checks.
//!
//! The token only names the caller. Whether that caller is an admin is read
//! from the user store on every privileged request, so a demotion takes
//! effect immediately even for tokens issued earlier.

use anyhow::Context;
use axum::{extract::FromRequestParts, http::request::Parts};

use dreamit_auth::IdentityClaims;
use dreamit_core::AppError;
use dreamit_db::UserStore;
use dreamit_models::UserRole;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Looks up the stored role of the token's email.
///
/// A token without an email, or an email with no user record, has no role.
pub async fn caller_role(
    users: &dyn UserStore,
    claims: &IdentityClaims,
) -> Result<Option<UserRole>, AppError> {
    let Some(email) = claims.email() else {
        return Ok(None);
    };

    let user = users
        .find_by_email(email)
        .await
        .context("Failed to look up caller")
        .map_err(AppError::database)?;

    Ok(user.and_then(|u| u.role))
}

/// Fails with 403 unless the caller's stored role is `admin`.
pub async fn ensure_admin(users: &dyn UserStore, claims: &IdentityClaims) -> Result<(), AppError> {
    let role = caller_role(users, claims).await?;
    let allowed = role == Some(UserRole::Admin);
    track_authorization_check(allowed, UserRole::Admin);

    if !allowed {
        return Err(AppError::forbidden(format!(
            "admin role required, {:?} has {:?}",
            claims.email(),
            role
        )));
    }

    Ok(())
}

/// Extractor for handlers only admins may call.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(state.users.as_ref(), auth_user.claims()).await?;
        Ok(RequireAdmin(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use dreamit_db::MemoryStore;
    use dreamit_models::{User, UserChanges};
    use serde_json::json;

    fn claims_for(email: &str) -> IdentityClaims {
        IdentityClaims::new(json!({ "email": email }).as_object().cloned().unwrap(), 0, 1)
    }

    async fn store_with(email: &str, role: Option<UserRole>) -> MemoryStore {
        let store = MemoryStore::new();
        let mut user = User::new(email, UserChanges::default());
        user.role = role;
        store.put_user(user).await;
        store
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let store = store_with("root@example.com", Some(UserRole::Admin)).await;
        assert!(ensure_admin(&store, &claims_for("root@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_teacher_is_forbidden() {
        let store = store_with("t@example.com", Some(UserRole::Teacher)).await;
        let err = ensure_admin(&store, &claims_for("t@example.com")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_caller_is_forbidden() {
        let store = MemoryStore::new();
        let err = ensure_admin(&store, &claims_for("ghost@example.com")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_claim_without_email_has_no_role() {
        let store = store_with("root@example.com", Some(UserRole::Admin)).await;
        let claims = IdentityClaims::new(json!({ "name": "root" }).as_object().cloned().unwrap(), 0, 1);
        assert_eq!(caller_role(&store, &claims).await.unwrap(), None);
    }
}
