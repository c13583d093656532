//! # dreamit CLI
//!
//! Administrative and seeding utilities for dreamit development.
//!
//! This library crate provides the functionality used by the CLI binary.
//! Everything goes through the store traits from `dreamit-db`, so the same
//! code runs against PostgreSQL and the in-memory store.
//!
//! ## Usage
//!
//! ```ignore
//! use dreamit_cli::admin::create_admin;
//! use dreamit_cli::seeder::{SeedConfig, seed_all};
//!
//! create_admin(&users, "root@example.com", None).await?;
//! seed_all(&users, &classes, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
