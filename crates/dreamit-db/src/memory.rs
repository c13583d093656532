//! In-memory stores for development and tests.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use dreamit_models::{
    Class, ClassChanges, ClassId, DeleteResult, InsertOneResult, NewClass, UpdateResult, User,
    UserChanges, UserId, UserRole,
};

use crate::store::{ClassStore, UserStore};

/// Both collections held in insertion order behind async locks.
///
/// Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    classes: Arc<RwLock<Vec<Class>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed user, replacing any record with the same email.
    pub async fn put_user(&self, user: User) {
        let mut users = self.users.write().await;
        users.retain(|u| u.email != user.email);
        users.push(user);
    }

    pub async fn put_class(&self, class: Class) {
        let mut classes = self.classes.write().await;
        classes.retain(|c| c.id != class.id);
        classes.push(class);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn upsert_by_email(&self, email: &str, changes: UserChanges) -> Result<UpdateResult> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            return Ok(UpdateResult::matched(user.apply(changes)));
        }

        let user = User::new(email, changes);
        let id = user.id.into_inner();
        users.push(user);
        Ok(UpdateResult::upserted(id))
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> Result<UpdateResult> {
        let mut users = self.users.write().await;
        Ok(match users.iter_mut().find(|u| u.id == id) {
            Some(user) => UpdateResult::matched(user.apply(UserChanges::role_only(role))),
            None => UpdateResult::unmatched(),
        })
    }
}

#[async_trait]
impl ClassStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Class>> {
        Ok(self.classes.read().await.clone())
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Class>> {
        let classes = self.classes.read().await;
        Ok(classes
            .iter()
            .filter(|c| c.email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_class: NewClass) -> Result<InsertOneResult> {
        let class = Class::from_new(new_class);
        let id = class.id.into_inner();
        self.classes.write().await.push(class);
        Ok(InsertOneResult::new(id))
    }

    async fn update(&self, id: ClassId, changes: ClassChanges) -> Result<UpdateResult> {
        let mut classes = self.classes.write().await;
        Ok(match classes.iter_mut().find(|c| c.id == id) {
            Some(class) => UpdateResult::matched(class.apply(changes)),
            None => UpdateResult::unmatched(),
        })
    }

    async fn delete(&self, id: ClassId) -> Result<DeleteResult> {
        let mut classes = self.classes.write().await;
        let before = classes.len();
        classes.retain(|c| c.id != id);
        Ok(DeleteResult::new((before - classes.len()) as u64))
    }
}
