//! # dreamit Models
//!
//! Domain models for the dreamit API.
//!
//! - [`ids`]: record identifiers
//! - [`documents`]: free-form fields, merge semantics and store result documents
//! - [`users`]: user records, roles and role-check responses
//! - [`classes`]: class records and their approval status
//!
//! # Example
//!
//! ```ignore
//! use dreamit_models::{User, UserChanges, UserRole};
//!
//! let mut user = User::new("alice@example.com", UserChanges::default());
//! user.apply(UserChanges::role_only(UserRole::Teacher));
//! assert!(user.has_role(UserRole::Teacher));
//! ```

pub mod classes;
pub mod documents;
pub mod ids;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use classes::{Class, ClassChanges, ClassStatus, NewClass};
pub use documents::{DeleteResult, Fields, InsertOneResult, UpdateResult, merge_fields};
pub use ids::{ClassId, UserId};
pub use users::{AdminStatus, TeacherStatus, User, UserChanges, UserRole};
