//! # dreamit Core
//!
//! Core types shared by every crate of the dreamit API.
//!
//! - [`errors`]: the application error type and its HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use dreamit_core::errors::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FORBIDDEN_MESSAGE, UNAUTHORIZED_MESSAGE};
