//! Request authentication and role checks.
//!
//! - [`auth`]: token verification middleware and the [`auth::AuthUser`] extractor
//! - [`role`]: admin checks against the stored user record
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] verifies the token and stores the claim in the
//!    request extensions, or answers 401
//! 3. Handlers read the claim through [`auth::AuthUser`]
//! 4. Privileged handlers additionally take [`role::RequireAdmin`], which
//!    looks the caller up in the user store and answers 403 unless the stored
//!    role is `admin`
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::auth::require_auth;
//!
//! let protected = Router::new()
//!     .route("/", get(get_users))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
