//! Class seeding.

use std::time::Instant;

use anyhow::Result;
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Sentence;
use serde_json::{Value, json};

use dreamit_db::ClassStore;
use dreamit_models::{ClassId, ClassStatus, Fields, NewClass};

/// A generated class.
#[derive(Debug, Clone)]
pub struct ClassSeed {
    pub owner: String,
    pub details: Fields,
    /// Approved right after insertion
    pub approved: bool,
}

/// Generates `count` classes, assigning owners round-robin. Every other class
/// is approved.
pub fn generate_classes(count: usize, owners: &[&str]) -> Vec<ClassSeed> {
    if owners.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|idx| {
            let name: String = CatchPhrase().fake();
            let description: String = Sentence(6..12).fake();
            let price: u32 = (10..200).fake();
            let seats: u32 = (5..40).fake();

            let mut details = Fields::new();
            details.insert("name".to_string(), Value::String(name));
            details.insert("description".to_string(), Value::String(description));
            details.insert("price".to_string(), json!(price));
            details.insert("seats".to_string(), json!(seats));

            ClassSeed {
                owner: owners[idx % owners.len()].to_string(),
                details,
                approved: idx % 2 == 0,
            }
        })
        .collect()
}

/// Inserts the seeds, approving the flagged ones, and returns the count.
pub async fn seed_classes(store: &dyn ClassStore, seeds: &[ClassSeed]) -> Result<usize> {
    if seeds.is_empty() {
        return Ok(0);
    }

    let start_time = Instant::now();
    println!("📚 Seeding {} classes...", seeds.len());

    for seed in seeds {
        let inserted = store
            .insert(NewClass {
                email: Some(seed.owner.clone()),
                details: seed.details.clone(),
            })
            .await?;

        if seed.approved {
            store
                .set_status(ClassId::from_uuid(inserted.inserted_id), ClassStatus::Active)
                .await?;
        }
    }

    println!(
        "   ✓ Inserted {} classes in {:?}",
        seeds.len(),
        start_time.elapsed()
    );

    Ok(seeds.len())
}
