//! Class records.
//!
//! A class belongs to the teacher whose email it carries and moves from
//! [`ClassStatus::Pending`] to [`ClassStatus::Active`] once an admin approves
//! it. Title, price, seats and the rest are free-form `details`.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use dreamit_core::AppError;

use crate::documents::{Fields, merge_fields, take_keys};
use crate::ids::ClassId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Pending,
    Active,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Active => "active",
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClassStatus::Pending),
            "active" => Ok(ClassStatus::Active),
            other => Err(AppError::bad_request(anyhow!("unknown status: {}", other))),
        }
    }
}

/// A stored class, serialized as a flat document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Class {
    #[serde(rename = "_id")]
    pub id: ClassId,
    /// Owner's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: ClassStatus,
    #[serde(flatten)]
    #[schema(ignore)]
    pub details: Fields,
}

impl Class {
    pub fn from_new(new_class: NewClass) -> Self {
        Self {
            id: ClassId::new(),
            email: new_class.email,
            status: ClassStatus::Pending,
            details: new_class.details,
        }
    }

    /// Applies a change set; returns `true` when the record changed.
    pub fn apply(&mut self, changes: ClassChanges) -> bool {
        let mut modified = false;
        if let Some(email) = changes.email {
            modified |= self.email.as_deref() != Some(email.as_str());
            self.email = Some(email);
        }
        if let Some(status) = changes.status {
            modified |= self.status != status;
            self.status = status;
        }
        modified |= merge_fields(&mut self.details, changes.fields);
        modified
    }
}

fn owner_email(value: Value) -> Result<String, AppError> {
    match value {
        Value::String(email) => Ok(email),
        _ => Err(AppError::bad_request(anyhow!("email must be a string"))),
    }
}

/// A class about to be inserted. New classes always start out pending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewClass {
    pub email: Option<String>,
    pub details: Fields,
}

impl NewClass {
    /// Builds an insert from a request body.
    ///
    /// A body without `email` is owned by `default_owner`. Any `status` the
    /// client sends is discarded.
    pub fn from_body(mut body: Fields, default_owner: Option<&str>) -> Result<Self, AppError> {
        let mut email = default_owner.map(str::to_string);
        for (key, value) in take_keys(&mut body, &["_id", "email", "status"]) {
            if key == "email" {
                email = Some(owner_email(value)?);
            }
        }

        Ok(Self {
            email,
            details: body,
        })
    }
}

/// Fields written by a class patch or status change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassChanges {
    pub email: Option<String>,
    pub status: Option<ClassStatus>,
    pub fields: Fields,
}

impl ClassChanges {
    pub fn from_body(mut body: Fields) -> Result<Self, AppError> {
        let mut changes = Self::default();
        for (key, value) in take_keys(&mut body, &["_id", "email", "status"]) {
            match key.as_str() {
                "email" => changes.email = Some(owner_email(value)?),
                "status" => {
                    let status = value
                        .as_str()
                        .ok_or_else(|| AppError::bad_request(anyhow!("status must be a string")))?;
                    changes.status = Some(status.parse()?);
                }
                _ => {}
            }
        }
        changes.fields = body;
        Ok(changes)
    }

    pub fn status_only(status: ClassStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when applying these changes would touch the approval status.
    pub fn touches_status(&self) -> bool {
        self.status.is_some()
    }
}
