//! User records.
//!
//! A user is keyed by `email` and carries an optional [`UserRole`]. The
//! stored role is the only input to authorization decisions; the identity
//! token merely names the email that is asking. Everything else the client
//! sends (display name, photo URL, ...) lives in the free-form `profile`.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use dreamit_core::AppError;

use crate::documents::{Fields, merge_fields, take_keys};
use crate::ids::UserId;

/// Privilege level stored on a user record. Absent means a plain student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(UserRole::Teacher),
            "admin" => Ok(UserRole::Admin),
            other => Err(AppError::bad_request(anyhow!("unknown role: {}", other))),
        }
    }
}

/// A stored user.
///
/// Serialized as a flat document: `_id`, `email`, `role` (omitted when
/// unset) and every profile field at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub profile: Fields,
}

impl User {
    /// A fresh record for `email` with `changes` applied.
    pub fn new(email: &str, changes: UserChanges) -> Self {
        let mut user = Self {
            id: UserId::new(),
            email: email.to_string(),
            role: None,
            profile: Fields::new(),
        };
        user.apply(changes);
        user
    }

    /// Applies a change set; returns `true` when the record changed.
    pub fn apply(&mut self, changes: UserChanges) -> bool {
        let mut modified = false;
        if let Some(role) = changes.role {
            modified |= self.role != role;
            self.role = role;
        }
        modified |= merge_fields(&mut self.profile, changes.fields);
        modified
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }
}

/// Fields written by an upsert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    /// `Some(None)` clears the role, `None` leaves it untouched.
    pub role: Option<Option<UserRole>>,
    pub fields: Fields,
}

impl UserChanges {
    /// Keys that never land in the free-form profile.
    pub const RESERVED: [&'static str; 3] = ["_id", "email", "role"];

    /// Splits a request body into typed changes.
    ///
    /// `_id` and `email` are dropped: the email comes from the path and the
    /// identifier is assigned by the store.
    pub fn from_body(mut body: Fields) -> Result<Self, AppError> {
        let mut role = None;
        for (key, value) in take_keys(&mut body, &Self::RESERVED) {
            if key == "role" {
                role = Some(match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.parse::<UserRole>()?),
                    _ => return Err(AppError::bad_request(anyhow!("role must be a string"))),
                });
            }
        }

        Ok(Self { role, fields: body })
    }

    pub fn role_only(role: UserRole) -> Self {
        Self {
            role: Some(Some(role)),
            fields: Fields::new(),
        }
    }

    /// True when applying these changes would touch the role.
    pub fn touches_role(&self) -> bool {
        self.role.is_some()
    }
}

/// Response of `GET /users/admin/{email}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}

/// Response of `GET /users/teacher/{email}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeacherStatus {
    pub teacher: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_role_round_trips_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), json!("admin"));
        assert_eq!("teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert!("student".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_from_body_strips_reserved_keys() {
        let changes = UserChanges::from_body(body(json!({
            "_id": "abc",
            "email": "someone-else@example.com",
            "name": "Alice"
        })))
        .unwrap();

        assert!(!changes.touches_role());
        assert_eq!(changes.fields, body(json!({ "name": "Alice" })));
    }

    #[test]
    fn test_from_body_parses_role() {
        let changes = UserChanges::from_body(body(json!({ "role": "admin" }))).unwrap();
        assert_eq!(changes.role, Some(Some(UserRole::Admin)));

        let cleared = UserChanges::from_body(body(json!({ "role": null }))).unwrap();
        assert_eq!(cleared.role, Some(None));
        assert!(cleared.touches_role());
    }

    #[test]
    fn test_from_body_rejects_unknown_role() {
        let err = UserChanges::from_body(body(json!({ "role": "owner" }))).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        assert!(UserChanges::from_body(body(json!({ "role": 1 }))).is_err());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let changes = UserChanges::from_body(body(json!({ "name": "Alice" }))).unwrap();
        let mut user = User::new("alice@example.com", changes.clone());

        assert!(!user.apply(changes));
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.profile["name"], "Alice");
    }

    #[test]
    fn test_apply_role() {
        let mut user = User::new("bob@example.com", UserChanges::default());
        assert!(user.apply(UserChanges::role_only(UserRole::Teacher)));
        assert!(user.has_role(UserRole::Teacher));
        assert!(!user.apply(UserChanges::role_only(UserRole::Teacher)));
    }

    #[test]
    fn test_user_serializes_flat() {
        let mut user = User::new(
            "carol@example.com",
            UserChanges::from_body(body(json!({ "photo": "p.png" }))).unwrap(),
        );
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], "carol@example.com");
        assert_eq!(value["photo"], "p.png");
        assert!(value.get("role").is_none());
        assert!(value["_id"].is_string());

        user.role = Some(UserRole::Admin);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "admin");
    }

    #[test]
    fn test_role_status_shapes() {
        assert_eq!(
            serde_json::to_value(AdminStatus { admin: false }).unwrap(),
            json!({ "admin": false })
        );
        assert_eq!(
            serde_json::to_value(TeacherStatus { teacher: true }).unwrap(),
            json!({ "teacher": true })
        );
    }
}
