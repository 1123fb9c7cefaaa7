//! Recursive JSON merge with conflict detection.
//!
//! Used to PATCH load-balancer configuration: the caller fetches the
//! current document, merges the requested changes in, and PUTs the result
//! back. Objects merge key-wise, equal values pass through, lists merge as
//! set-union by value equality, and any scalar disagreement is a hard
//! conflict carrying the dotted key path.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::domain::MergeError;

/// Merge `patch` into `base` and return the result.
///
/// Non-object roots merge like any other value: equal passes, arrays
/// union, anything else conflicts at the root path.
///
/// # Errors
///
/// [`MergeError::Conflict`] on the first scalar mismatch.
pub fn deep_merge(mut base: Value, patch: &Value) -> Result<Value, MergeError> {
    merge_value(&mut base, patch, &mut Vec::new())?;
    Ok(base)
}

fn merge_value(base: &mut Value, patch: &Value, path: &mut Vec<String>) -> Result<(), MergeError> {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut *base, patch) {
        return merge_objects(base_map, patch_map, path);
    }
    if *base == *patch {
        return Ok(());
    }
    if let (Value::Array(base_items), Value::Array(patch_items)) = (&mut *base, patch) {
        for item in patch_items {
            if !base_items.contains(item) {
                base_items.push(item.clone());
            }
        }
        return Ok(());
    }
    Err(MergeError::Conflict {
        path: if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        },
    })
}

fn merge_objects(
    base: &mut Map<String, Value>,
    patch: &Map<String, Value>,
    path: &mut Vec<String>,
) -> Result<(), MergeError> {
    for (key, incoming) in patch {
        match base.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
            Entry::Occupied(mut slot) => {
                path.push(key.clone());
                merge_value(slot.get_mut(), incoming, path)?;
                path.pop();
            }
        }
    }
    Ok(())
}
