//! PostgreSQL-backed stores.
//!
//! Typed attributes (`email`, `role`, `status`) live in columns; everything
//! else is kept in a JSONB object. Merging writes lock the row, apply the
//! change set in Rust and only write back when something actually changed, so
//! `modifiedCount` reflects real modifications.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use dreamit_models::{
    Class, ClassChanges, ClassId, ClassStatus, DeleteResult, Fields, InsertOneResult, NewClass,
    UpdateResult, User, UserChanges, UserId, UserRole,
};

use crate::store::{ClassStore, UserStore};

#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    role: Option<String>,
    profile: Json<Fields>,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = row
            .role
            .map(|r| {
                r.parse::<UserRole>()
                    .map_err(|_| anyhow!("unknown role {:?} stored for {}", r, row.email))
            })
            .transpose()?;

        Ok(User {
            id: row.id,
            email: row.email,
            role,
            profile: row.profile.0,
        })
    }
}

#[derive(Debug, FromRow)]
struct ClassRow {
    id: ClassId,
    email: Option<String>,
    status: String,
    details: Json<Fields>,
}

impl TryFrom<ClassRow> for Class {
    type Error = anyhow::Error;

    fn try_from(row: ClassRow) -> Result<Self> {
        let status = row
            .status
            .parse::<ClassStatus>()
            .map_err(|_| anyhow!("unknown status {:?} stored for class {}", row.status, row.id))?;

        Ok(Class {
            id: row.id,
            email: row.email,
            status,
            details: row.details.0,
        })
    }
}

const USER_COLUMNS: &str = "id, email, role, profile";
const CLASS_COLUMNS: &str = "id, email, status, details";

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write_user(
        tx: &mut sqlx::PgConnection,
        user: &User,
    ) -> Result<()> {
        sqlx::query("UPDATE users SET role = $2, profile = $3 WHERE id = $1")
            .bind(user.id)
            .bind(user.role.map(|r| r.as_str()))
            .bind(Json(&user.profile))
            .execute(tx)
            .await
            .context("Failed to update user")?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch users")?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        row.map(User::try_from).transpose()
    }

    async fn upsert_by_email(&self, email: &str, changes: UserChanges) -> Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        // A row lock cannot guard a row that does not exist yet, so the insert
        // goes first and yields to a concurrent one through the unique email.
        let user = User::new(email, changes.clone());
        let inserted = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (id, email, role, profile) VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO NOTHING
             RETURNING id",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.map(|r| r.as_str()))
        .bind(Json(&user.profile))
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to insert user")?;

        if let Some(id) = inserted {
            tx.commit().await?;
            return Ok(UpdateResult::upserted(id.into_inner()));
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to lock user")?;

        let mut user = User::try_from(row)?;
        let modified = user.apply(changes);
        if modified {
            Self::write_user(&mut tx, &user).await?;
        }

        tx.commit().await?;
        Ok(UpdateResult::matched(modified))
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to lock user")?;

        let Some(row) = existing else {
            return Ok(UpdateResult::unmatched());
        };

        let mut user = User::try_from(row)?;
        let modified = user.apply(UserChanges::role_only(role));
        if modified {
            Self::write_user(&mut tx, &user).await?;
        }

        tx.commit().await?;
        Ok(UpdateResult::matched(modified))
    }
}

#[derive(Clone, Debug)]
pub struct PgClassStore {
    pool: PgPool,
}

impl PgClassStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassStore for PgClassStore {
    async fn find_all(&self) -> Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {} FROM classes ORDER BY created_at, id",
            CLASS_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch classes")?;

        rows.into_iter().map(Class::try_from).collect()
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {} FROM classes WHERE email = $1 ORDER BY created_at, id",
            CLASS_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch classes by owner")?;

        rows.into_iter().map(Class::try_from).collect()
    }

    async fn insert(&self, new_class: NewClass) -> Result<InsertOneResult> {
        let class = Class::from_new(new_class);

        sqlx::query("INSERT INTO classes (id, email, status, details) VALUES ($1, $2, $3, $4)")
            .bind(class.id)
            .bind(&class.email)
            .bind(class.status.as_str())
            .bind(Json(&class.details))
            .execute(&self.pool)
            .await
            .context("Failed to insert class")?;

        Ok(InsertOneResult::new(class.id.into_inner()))
    }

    async fn update(&self, id: ClassId, changes: ClassChanges) -> Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {} FROM classes WHERE id = $1 FOR UPDATE",
            CLASS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to lock class")?;

        let Some(row) = existing else {
            return Ok(UpdateResult::unmatched());
        };

        let mut class = Class::try_from(row)?;
        let modified = class.apply(changes);
        if modified {
            sqlx::query("UPDATE classes SET email = $2, status = $3, details = $4 WHERE id = $1")
                .bind(class.id)
                .bind(&class.email)
                .bind(class.status.as_str())
                .bind(Json(&class.details))
                .execute(&mut *tx)
                .await
                .context("Failed to update class")?;
        }

        tx.commit().await?;
        Ok(UpdateResult::matched(modified))
    }

    async fn delete(&self, id: ClassId) -> Result<DeleteResult> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete class")?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_upsert_by_email_is_idempotent(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let changes = UserChanges::from_body(fields(json!({ "name": "Alice" }))).unwrap();

        let first = store
            .upsert_by_email("alice@example.com", changes.clone())
            .await
            .unwrap();
        assert_eq!(first.upserted_count, 1);

        let second = store
            .upsert_by_email("alice@example.com", changes)
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 0);

        let user = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(user.profile["name"], "Alice");
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_concurrent_first_upserts_all_succeed(pool: PgPool) {
        let store = PgUserStore::new(pool);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert_by_email("alice@example.com", UserChanges::default())
                        .await
                })
            })
            .collect();

        let mut upserted = 0;
        for task in tasks {
            let result = task.await.unwrap().unwrap();
            upserted += result.upserted_count;
        }

        assert_eq!(upserted, 1);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_set_role_does_not_insert(pool: PgPool) {
        let store = PgUserStore::new(pool);

        let missing = store.set_role(UserId::new(), UserRole::Teacher).await.unwrap();
        assert_eq!(missing, UpdateResult::unmatched());

        store
            .upsert_by_email("bob@example.com", UserChanges::default())
            .await
            .unwrap();
        let bob = store.find_by_email("bob@example.com").await.unwrap().unwrap();

        let promoted = store.set_role(bob.id, UserRole::Teacher).await.unwrap();
        assert_eq!(promoted.modified_count, 1);
        let bob = store.find_by_email("bob@example.com").await.unwrap().unwrap();
        assert!(bob.has_role(UserRole::Teacher));
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_class_lifecycle(pool: PgPool) {
        let store = PgClassStore::new(pool);
        let new_class =
            NewClass::from_body(fields(json!({ "name": "Clay" })), Some("t@example.com")).unwrap();

        let inserted = store.insert(new_class).await.unwrap();
        let id = ClassId::from_uuid(inserted.inserted_id);

        let owned = store.find_by_owner("t@example.com").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].status, ClassStatus::Pending);

        let approved = store.set_status(id, ClassStatus::Active).await.unwrap();
        assert_eq!(approved.modified_count, 1);

        let patched = store
            .update(id, ClassChanges::from_body(fields(json!({ "seats": 8 }))).unwrap())
            .await
            .unwrap();
        assert_eq!(patched.matched_count, 1);

        let classes = store.find_all().await.unwrap();
        assert_eq!(classes[0].status, ClassStatus::Active);
        assert_eq!(classes[0].details["seats"], 8);

        assert_eq!(store.delete(id).await.unwrap().deleted_count, 1);
        assert_eq!(store.delete(id).await.unwrap().deleted_count, 0);
    }
}
