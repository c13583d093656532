//! Store traits for the two collections.
//!
//! Every write returns the result document the HTTP layer hands back to the
//! client unchanged. Id-keyed updates never insert: a missing record yields
//! `matchedCount: 0`.

use anyhow::Result;
use async_trait::async_trait;

use dreamit_models::{
    Class, ClassChanges, ClassId, ClassStatus, DeleteResult, InsertOneResult, NewClass,
    UpdateResult, User, UserChanges, UserId, UserRole,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Inserts the user when `email` is unknown, otherwise merges `changes`.
    async fn upsert_by_email(&self, email: &str, changes: UserChanges) -> Result<UpdateResult>;

    async fn set_role(&self, id: UserId, role: UserRole) -> Result<UpdateResult>;
}

#[async_trait]
pub trait ClassStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Class>>;

    /// Classes whose owner email equals `email`.
    async fn find_by_owner(&self, email: &str) -> Result<Vec<Class>>;

    async fn insert(&self, new_class: NewClass) -> Result<InsertOneResult>;

    async fn set_status(&self, id: ClassId, status: ClassStatus) -> Result<UpdateResult> {
        self.update(id, ClassChanges::status_only(status)).await
    }

    async fn update(&self, id: ClassId, changes: ClassChanges) -> Result<UpdateResult>;

    async fn delete(&self, id: ClassId) -> Result<DeleteResult>;
}
