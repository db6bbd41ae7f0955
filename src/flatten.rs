// SPDX-License-Identifier: PMPL-1.0-or-later

//! Flatten a nested mapping into a single level keyed by dot-paths, and back.
//!
//! Sequences are a flattening boundary: a sequence value is kept in place
//! under its dot-path (never expanded into per-index paths), but mapping
//! elements inside it are themselves flattened so the inverse can rebuild
//! them. For any tree whose keys contain no literal `.` and are not purely
//! numeric, `unflatten(flatten(x)) == x`.

use crate::error::{OmnibaseError, Result};
use crate::path;
use crate::value::{Map, Value};

/// Convert a nested mapping into a single-level mapping keyed by dot-paths.
///
/// Output keys never carry a leading or trailing separator. An empty mapping
/// value is preserved as its own entry so the round-trip invariant holds for
/// empty objects too.
pub fn flatten(map: &Map) -> Map {
    let mut flat = Map::new();
    flatten_into(map, "", &mut flat);
    flat
}

fn flatten_into(map: &Map, prefix: &str, flat: &mut Map) {
    for (key, value) in map {
        let dot_path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{}{key}", path::SEPARATOR)
        };
        match value {
            Value::Object(inner) if inner.is_empty() => {
                flat.insert(dot_path, Value::empty_object());
            }
            Value::Object(inner) => flatten_into(inner, &dot_path, flat),
            Value::Array(items) => {
                flat.insert(
                    dot_path,
                    Value::Array(items.iter().map(flatten_element).collect()),
                );
            }
            scalar => {
                flat.insert(dot_path, scalar.clone());
            }
        }
    }
}

/// Flatten a single sequence element: mapping elements become flat maps,
/// nested sequences recurse, scalars pass through.
fn flatten_element(value: &Value) -> Value {
    match value {
        Value::Object(inner) => Value::Object(flatten(inner)),
        Value::Array(items) => Value::Array(items.iter().map(flatten_element).collect()),
        scalar => scalar.clone(),
    }
}

/// Rebuild a nested mapping from a flat dot-path mapping.
///
/// Mapping elements of sequences are recursively unflattened.
///
/// # Errors
///
/// Returns [`OmnibaseError::StructureConflict`] naming the full offending
/// path when an intermediate segment already holds a non-mapping value, and
/// [`OmnibaseError::InvalidPath`] when a key is not a valid dot-path.
pub fn unflatten(flat: &Map) -> Result<Map> {
    let mut root = Map::new();
    for (dot_path, value) in flat {
        let segments = path::parse(dot_path)?;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| OmnibaseError::InvalidPath(dot_path.clone()))?;

        let mut cursor = &mut root;
        for segment in parents {
            let slot = cursor
                .entry(segment.clone())
                .or_insert_with(Value::empty_object);
            cursor = match slot {
                Value::Object(inner) => inner,
                _ => return Err(OmnibaseError::StructureConflict(dot_path.clone())),
            };
        }
        cursor.insert(last.clone(), unflatten_element(value)?);
    }
    Ok(root)
}

fn unflatten_element(value: &Value) -> Result<Value> {
    match value {
        Value::Object(inner) => Ok(Value::Object(unflatten(inner)?)),
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(unflatten_element)
                .collect::<Result<Vec<_>>>()?,
        )),
        scalar => Ok(scalar.clone()),
    }
}
