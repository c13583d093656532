use anyhow::Context;
use tracing::info;

use dreamit_auth::IdentityClaims;
use dreamit_core::AppError;
use dreamit_db::{ClassStore, UserStore};
use dreamit_models::{
    Class, ClassChanges, ClassId, ClassStatus, DeleteResult, Fields, InsertOneResult, NewClass,
    UpdateResult,
};

use crate::metrics::{track_class_approved, track_class_created};
use crate::middleware::role::ensure_admin;

pub struct ClassService;

impl ClassService {
    pub async fn get_classes(classes: &dyn ClassStore) -> Result<Vec<Class>, AppError> {
        classes
            .find_all()
            .await
            .context("Failed to fetch classes")
            .map_err(AppError::database)
    }

    pub async fn get_classes_by_owner(
        classes: &dyn ClassStore,
        email: &str,
    ) -> Result<Vec<Class>, AppError> {
        classes
            .find_by_owner(email)
            .await
            .context("Failed to fetch classes by owner")
            .map_err(AppError::database)
    }

    /// Inserts a pending class owned by the body's `email`, or by the caller.
    pub async fn create_class(
        classes: &dyn ClassStore,
        caller: &IdentityClaims,
        body: Fields,
    ) -> Result<InsertOneResult, AppError> {
        let new_class = NewClass::from_body(body, caller.email())?;

        let result = classes
            .insert(new_class)
            .await
            .context("Failed to insert class")
            .map_err(AppError::database)?;

        track_class_created();
        info!(class_id = %result.inserted_id, "Created class");
        Ok(result)
    }

    pub async fn approve_class(
        classes: &dyn ClassStore,
        id: ClassId,
    ) -> Result<UpdateResult, AppError> {
        let result = classes
            .set_status(id, ClassStatus::Active)
            .await
            .context("Failed to approve class")
            .map_err(AppError::database)?;

        if result.modified_count > 0 {
            track_class_approved();
            info!(class_id = %id, "Approved class");
        }

        Ok(result)
    }

    /// Merges `body` into the class. Changing `status` needs an admin.
    pub async fn update_class(
        classes: &dyn ClassStore,
        users: &dyn UserStore,
        caller: &IdentityClaims,
        id: ClassId,
        body: Fields,
    ) -> Result<UpdateResult, AppError> {
        let changes = ClassChanges::from_body(body)?;

        if changes.touches_status() {
            ensure_admin(users, caller).await?;
        }

        classes
            .update(id, changes)
            .await
            .context("Failed to update class")
            .map_err(AppError::database)
    }

    pub async fn delete_class(
        classes: &dyn ClassStore,
        id: ClassId,
    ) -> Result<DeleteResult, AppError> {
        classes
            .delete(id)
            .await
            .context("Failed to delete class")
            .map_err(AppError::database)
    }
}
