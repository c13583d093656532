//! User seeding.

use std::time::Instant;

use anyhow::Result;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use serde_json::Value;

use dreamit_db::UserStore;
use dreamit_models::{Fields, UserChanges, UserRole};

use super::SEED_EMAIL_DOMAIN;

/// A generated user.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
}

impl UserSeed {
    fn changes(&self) -> UserChanges {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        UserChanges {
            role: self.role.map(Some),
            fields,
        }
    }
}

/// Generates `count` users with the given role.
///
/// The index is folded into the address so names drawn twice still yield
/// distinct emails.
pub fn generate_users(count: usize, role: Option<UserRole>) -> Vec<UserSeed> {
    let prefix = role.map(|r| r.as_str()).unwrap_or("user");

    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+{}{}@{}",
                first_name.to_lowercase().replace(' ', ""),
                last_name.to_lowercase().replace(' ', ""),
                prefix,
                idx,
                SEED_EMAIL_DOMAIN
            );

            UserSeed {
                name: format!("{} {}", first_name, last_name),
                email,
                role,
            }
        })
        .collect()
}

/// Upserts the seeds and returns how many were processed.
pub async fn seed_users(store: &dyn UserStore, seeds: &[UserSeed]) -> Result<usize> {
    if seeds.is_empty() {
        return Ok(0);
    }

    let start_time = Instant::now();
    println!("👥 Seeding {} users...", seeds.len());

    for seed in seeds {
        store.upsert_by_email(&seed.email, seed.changes()).await?;
    }

    println!(
        "   ✓ Inserted {} users in {:?}",
        seeds.len(),
        start_time.elapsed()
    );

    Ok(seeds.len())
}
