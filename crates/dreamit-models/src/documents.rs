//! Document-store plumbing shared by both collections.
//!
//! Records carry a few typed columns plus a free-form JSON object. Writes
//! follow top-level `$set` semantics: every key in the change set replaces
//! the stored key of the same name, nothing is deep-merged. Handlers return
//! the store's result document unshaped, so the result types below are part
//! of the HTTP contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// Free-form fields of a record.
pub type Fields = Map<String, Value>;

/// Applies `changes` onto `target` key by key.
///
/// Returns `true` when at least one stored value changed.
pub fn merge_fields(target: &mut Fields, changes: Fields) -> bool {
    let mut modified = false;
    for (key, value) in changes {
        if target.get(&key) != Some(&value) {
            target.insert(key, value);
            modified = true;
        }
    }
    modified
}

/// Removes `keys` from `fields`, returning the removed entries in order.
pub fn take_keys(fields: &mut Fields, keys: &[&str]) -> Vec<(String, Value)> {
    keys.iter()
        .filter_map(|key| fields.remove(*key).map(|value| (key.to_string(), value)))
        .collect()
}

/// Outcome of an update or upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateResult {
    /// No record matched the filter.
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// One record matched; `modified` says whether any value changed.
    pub fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Self::unmatched()
        }
    }

    /// No record matched and a new one was inserted.
    pub fn upserted(id: Uuid) -> Self {
        Self {
            upserted_count: 1,
            upserted_id: Some(id),
            ..Self::unmatched()
        }
    }
}

/// Outcome of a single insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
