// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dot-path read, write, and removal on nested value trees.
//!
//! [`set`], [`pop`], and [`find_replace`] mutate their input in place;
//! callers needing isolation should use the copy-returning [`with_set`] and
//! [`with_removed`] variants, or clone first. A purely-numeric path segment
//! addresses a sequence index when the traversal target is an array.

use crate::error::{OmnibaseError, Result};
use crate::path;
use crate::value::Value;

/// Read the value at `dot_path`, if present.
///
/// Returns `Ok(None)` when any segment is absent, an index is out of range,
/// or a segment lands on a non-container value.
pub fn get<'a>(root: &'a Value, dot_path: &str) -> Result<Option<&'a Value>> {
    let segments = path::parse(dot_path)?;
    let mut cursor = root;
    for segment in &segments {
        cursor = match cursor {
            Value::Object(map) => match map.get(segment) {
                Some(value) => value,
                None => return Ok(None),
            },
            Value::Array(items) if path::is_index(segment) => {
                let index = path::parse_index(segment, dot_path)?;
                match items.get(index) {
                    Some(value) => value,
                    None => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
    }
    Ok(Some(cursor))
}

/// Write `value` at `dot_path`, creating intermediate mappings as needed.
/// Mutates `root` in place.
///
/// Within arrays, a numeric segment must address an existing element (or,
/// for the final segment, one past the end to append).
///
/// # Errors
///
/// Returns [`OmnibaseError::StructureConflict`] when an intermediate segment
/// holds a non-container value or an array index is out of range.
pub fn set(root: &mut Value, dot_path: &str, value: Value) -> Result<()> {
    let segments = path::parse(dot_path)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| OmnibaseError::InvalidPath(dot_path.to_owned()))?;

    let mut cursor = root;
    for segment in parents {
        cursor = match cursor {
            Value::Object(map) => map
                .entry(segment.clone())
                .or_insert_with(Value::empty_object),
            Value::Array(items) if path::is_index(segment) => {
                let index = path::parse_index(segment, dot_path)?;
                items
                    .get_mut(index)
                    .ok_or_else(|| OmnibaseError::StructureConflict(dot_path.to_owned()))?
            }
            _ => return Err(OmnibaseError::StructureConflict(dot_path.to_owned())),
        };
    }

    match cursor {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(items) if path::is_index(last) => {
            let index = path::parse_index(last, dot_path)?;
            if let Some(slot) = items.get_mut(index) {
                *slot = value;
                Ok(())
            } else if index == items.len() {
                items.push(value);
                Ok(())
            } else {
                Err(OmnibaseError::StructureConflict(dot_path.to_owned()))
            }
        }
        _ => Err(OmnibaseError::StructureConflict(dot_path.to_owned())),
    }
}

/// Remove and return the value at `dot_path`. Mutates `root` in place.
///
/// Returns `Ok(None)` when the path does not address an existing value.
pub fn pop(root: &mut Value, dot_path: &str) -> Result<Option<Value>> {
    let segments = path::parse(dot_path)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| OmnibaseError::InvalidPath(dot_path.to_owned()))?;

    let mut cursor = root;
    for segment in parents {
        cursor = match cursor {
            Value::Object(map) => match map.get_mut(segment) {
                Some(value) => value,
                None => return Ok(None),
            },
            Value::Array(items) if path::is_index(segment) => {
                let index = path::parse_index(segment, dot_path)?;
                match items.get_mut(index) {
                    Some(value) => value,
                    None => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
    }

    match cursor {
        Value::Object(map) => Ok(map.remove(last)),
        Value::Array(items) if path::is_index(last) => {
            let index = path::parse_index(last, dot_path)?;
            if index < items.len() {
                Ok(Some(items.remove(index)))
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

/// Replace every leaf equal to `find` with `replace`, at any depth.
/// Mutates `root` in place and returns the number of replacements.
///
/// Only non-container values are compared; mappings and sequences are
/// traversed, never replaced wholesale.
pub fn find_replace(root: &mut Value, find: &Value, replace: &Value) -> usize {
    match root {
        Value::Object(map) => map
            .values_mut()
            .map(|value| find_replace(value, find, replace))
            .sum(),
        Value::Array(items) => items
            .iter_mut()
            .map(|value| find_replace(value, find, replace))
            .sum(),
        leaf => {
            if leaf == find {
                *leaf = replace.clone();
                1
            } else {
                0
            }
        }
    }
}

/// Copy-returning variant of [`set`]: leaves `root` untouched.
pub fn with_set(root: &Value, dot_path: &str, value: Value) -> Result<Value> {
    let mut copy = root.clone();
    set(&mut copy, dot_path, value)?;
    Ok(copy)
}

/// Copy-returning variant of [`pop`]: leaves `root` untouched and returns
/// the modified copy alongside the removed value.
pub fn with_removed(root: &Value, dot_path: &str) -> Result<(Value, Option<Value>)> {
    let mut copy = root.clone();
    let removed = pop(&mut copy, dot_path)?;
    Ok((copy, removed))
}
