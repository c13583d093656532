use anyhow::Context;
use tracing::info;

use dreamit_auth::IdentityClaims;
use dreamit_core::AppError;
use dreamit_db::UserStore;
use dreamit_models::{
    AdminStatus, Fields, TeacherStatus, UpdateResult, User, UserChanges, UserId, UserRole,
};

use crate::metrics::track_user_promoted;
use crate::middleware::role::ensure_admin;

pub struct UserService;

impl UserService {
    pub async fn get_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
        users
            .find_all()
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)
    }

    /// Creates or merges the record keyed by `email`.
    ///
    /// Callers may write their own record. Writing someone else's record, or
    /// any record's role, requires the caller to be a stored admin.
    pub async fn upsert_user(
        users: &dyn UserStore,
        caller: &IdentityClaims,
        email: &str,
        body: Fields,
    ) -> Result<UpdateResult, AppError> {
        let changes = UserChanges::from_body(body)?;

        if !caller.is_identity(email) || changes.touches_role() {
            ensure_admin(users, caller).await?;
        }

        users
            .upsert_by_email(email, changes)
            .await
            .context("Failed to upsert user")
            .map_err(AppError::database)
    }

    pub async fn promote_to_teacher(
        users: &dyn UserStore,
        id: UserId,
    ) -> Result<UpdateResult, AppError> {
        let result = users
            .set_role(id, UserRole::Teacher)
            .await
            .context("Failed to promote user")
            .map_err(AppError::database)?;

        if result.modified_count > 0 {
            track_user_promoted(UserRole::Teacher);
            info!(user_id = %id, "Promoted user to teacher");
        }

        Ok(result)
    }

    /// Whether `email` holds `role`, answered only to the email itself.
    ///
    /// Any other caller gets `false` without a store lookup.
    async fn has_role(
        users: &dyn UserStore,
        caller: &IdentityClaims,
        email: &str,
        role: UserRole,
    ) -> Result<bool, AppError> {
        if !caller.is_identity(email) {
            return Ok(false);
        }

        let user = users
            .find_by_email(email)
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)?;

        Ok(user.is_some_and(|u| u.has_role(role)))
    }

    pub async fn admin_status(
        users: &dyn UserStore,
        caller: &IdentityClaims,
        email: &str,
    ) -> Result<AdminStatus, AppError> {
        let admin = Self::has_role(users, caller, email, UserRole::Admin).await?;
        Ok(AdminStatus { admin })
    }

    pub async fn teacher_status(
        users: &dyn UserStore,
        caller: &IdentityClaims,
        email: &str,
    ) -> Result<TeacherStatus, AppError> {
        let teacher = Self::has_role(users, caller, email, UserRole::Teacher).await?;
        Ok(TeacherStatus { teacher })
    }
}
