// SPDX-License-Identifier: PMPL-1.0-or-later

//! Recursive key-name validation for nested mappings.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{OmnibaseError, Result};
use crate::value::{Map, Value};

/// Identifier grammar for mapping keys: a letter, underscore, or `$`,
/// followed by letters, digits, `_`, `-`, or `$`.
static KEY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a constant, so compilation cannot fail.
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_\-$]*$").expect("key-name grammar compiles")
});

/// Validate every key of a nested mapping, at every depth.
///
/// Descends into nested mappings and into mapping elements of sequences.
///
/// # Errors
///
/// Fails with [`OmnibaseError::InvalidKeyName`] carrying the first offending
/// key name.
pub fn validate_keys(map: &Map) -> Result<()> {
    for (key, value) in map {
        if !KEY_NAME.is_match(key) {
            return Err(OmnibaseError::InvalidKeyName(key.clone()));
        }
        validate_value(value)?;
    }
    Ok(())
}

fn validate_value(value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => validate_keys(map),
        Value::Array(items) => items.iter().try_for_each(validate_value),
        _ => Ok(()),
    }
}
