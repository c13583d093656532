//! Development data seeding.
//!
//! Generated addresses look like `first.last+teacher3@example.com`. The tag
//! after `+` is what [`clear_seeded`] keys on, so other `@example.com`
//! accounts survive a clear.

mod classes;
mod users;

use std::time::Instant;

use anyhow::{Context, Result};
use sqlx::PgPool;

use dreamit_db::{ClassStore, UserStore};

pub use classes::{ClassSeed, generate_classes, seed_classes};
pub use users::{UserSeed, generate_users, seed_users};

/// Domain shared by every generated address.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

/// How much data [`seed_all`] generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    /// Users without a role
    pub users: usize,
    pub teachers: usize,
    /// Classes spread across the seeded teachers
    pub classes: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            teachers: 3,
            classes: 10,
        }
    }
}

/// Counts of what a seeding run inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub teachers: usize,
    pub classes: usize,
}

/// Seeds plain users, then teachers, then classes owned by those teachers.
pub async fn seed_all(
    users: &dyn UserStore,
    classes: &dyn ClassStore,
    config: SeedConfig,
) -> Result<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...");

    let plain = seed_users(users, &generate_users(config.users, None)).await?;
    let teachers = generate_users(config.teachers, Some(dreamit_models::UserRole::Teacher));
    let teacher_count = seed_users(users, &teachers).await?;

    let owners: Vec<&str> = teachers.iter().map(|t| t.email.as_str()).collect();
    let class_count = seed_classes(classes, &generate_classes(config.classes, &owners)).await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        users: plain,
        teachers: teacher_count,
        classes: class_count,
    })
}

/// Address tags written by [`generate_users`], one per seeded role.
pub const SEED_EMAIL_TAGS: [&str; 2] = ["user", "teacher"];

/// `LIKE` patterns matching generated addresses only, e.g.
/// `%+teacher_%@example.com`. Hand-made accounts on the seed domain are left
/// alone.
pub fn seeded_email_patterns() -> Vec<String> {
    SEED_EMAIL_TAGS
        .iter()
        .map(|tag| format!("%+{}_%@{}", tag, SEED_EMAIL_DOMAIN))
        .collect()
}

/// Deletes every seeded class and user. Returns `(users, classes)` removed.
pub async fn clear_seeded(pool: &PgPool) -> Result<(u64, u64)> {
    let patterns = seeded_email_patterns();
    let mut tx = pool.begin().await?;

    let classes = sqlx::query("DELETE FROM classes WHERE email LIKE ANY($1)")
        .bind(&patterns)
        .execute(&mut *tx)
        .await
        .context("Failed to delete seeded classes")?
        .rows_affected();

    let users = sqlx::query("DELETE FROM users WHERE email LIKE ANY($1)")
        .bind(&patterns)
        .execute(&mut *tx)
        .await
        .context("Failed to delete seeded users")?
        .rows_affected();

    tx.commit().await?;
    Ok((users, classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamit_db::{MemoryStore, PgClassStore, PgUserStore};
    use dreamit_models::{ClassStatus, NewClass, UserChanges, UserRole};

    #[tokio::test]
    async fn test_seed_all_links_classes_to_teachers() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            users: 4,
            teachers: 2,
            classes: 6,
        };

        let summary = seed_all(&store, &store, config).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                users: 4,
                teachers: 2,
                classes: 6
            }
        );

        let users = UserStore::find_all(&store).await.unwrap();
        assert_eq!(users.len(), 6);
        let teachers: Vec<_> = users
            .iter()
            .filter(|u| u.has_role(UserRole::Teacher))
            .map(|u| u.email.clone())
            .collect();
        assert_eq!(teachers.len(), 2);

        let classes = ClassStore::find_all(&store).await.unwrap();
        assert_eq!(classes.len(), 6);
        for class in &classes {
            let owner = class.email.as_deref().unwrap();
            assert!(teachers.iter().any(|t| t == owner));
        }
        assert!(classes.iter().any(|c| c.status == ClassStatus::Active));
        assert!(classes.iter().any(|c| c.status == ClassStatus::Pending));
    }

    #[tokio::test]
    async fn test_seed_without_teachers_skips_classes() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            users: 1,
            teachers: 0,
            classes: 5,
        };

        let summary = seed_all(&store, &store, config).await.unwrap();
        assert_eq!(summary.classes, 0);
        assert!(ClassStore::find_all(&store).await.unwrap().is_empty());
    }

    #[test]
    fn test_patterns_cover_generated_tags() {
        assert_eq!(
            seeded_email_patterns(),
            ["%+user_%@example.com", "%+teacher_%@example.com"]
        );

        let teacher = &generate_users(1, Some(UserRole::Teacher))[0];
        assert!(teacher.email.contains("+teacher0@"));
        let plain = &generate_users(1, None)[0];
        assert!(plain.email.contains("+user0@"));
    }

    #[sqlx::test(migrator = "dreamit_db::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_clear_seeded_keeps_hand_made_accounts(pool: PgPool) {
        let users = PgUserStore::new(pool.clone());
        let classes = PgClassStore::new(pool.clone());

        users
            .upsert_by_email("root@example.com", UserChanges::role_only(UserRole::Admin))
            .await
            .unwrap();
        classes
            .insert(NewClass {
                email: Some("root@example.com".to_string()),
                ..NewClass::default()
            })
            .await
            .unwrap();

        let config = SeedConfig {
            users: 2,
            teachers: 1,
            classes: 2,
        };
        seed_all(&users, &classes, config).await.unwrap();

        let (removed_users, removed_classes) = clear_seeded(&pool).await.unwrap();
        assert_eq!(removed_users, 3);
        assert_eq!(removed_classes, 2);

        let remaining = UserStore::find_all(&users).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email, "root@example.com");
        assert_eq!(classes.find_by_owner("root@example.com").await.unwrap().len(), 1);
    }
}
