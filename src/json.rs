// SPDX-License-Identifier: PMPL-1.0-or-later

//! JSON encoding and decoding with timestamp handling.
//!
//! [`dumps`] serializes a [`Value`] tree, rendering timestamps as ISO-8601
//! strings via the `Serialize` impl. [`loads`] is the inverse: after plain
//! JSON parsing it runs an explicit tree-walk pass that promotes every
//! string leaf parsing as ISO-8601 into a [`Value::DateTime`].

use crate::error::Result;
use crate::timestamp;
use crate::value::Value;

/// Serialize a value tree to a JSON string.
///
/// # Errors
///
/// Returns [`crate::error::OmnibaseError::Serialization`] on failure.
pub fn dumps(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserialize a JSON string into a [`Value`] tree with timestamp promotion.
///
/// An empty (or all-whitespace) input decodes to [`Value::Null`] rather than
/// failing. A top-level JSON array of strings is decoded element-by-element
/// as independent JSON texts, with no timestamp promotion at that level
/// (empty elements decode to null). Every other shape gets the promotion
/// pass applied to all string leaves.
///
/// # Errors
///
/// Returns [`crate::error::OmnibaseError::Serialization`] when the input (or
/// an element of a top-level string array) is not valid JSON.
pub fn loads(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    let parsed: serde_json::Value = serde_json::from_str(raw)?;

    if let serde_json::Value::Array(items) = &parsed {
        if !items.is_empty() && items.iter().all(serde_json::Value::is_string) {
            let mut decoded = Vec::with_capacity(items.len());
            for item in items {
                let Some(text) = item.as_str() else { continue };
                if text.is_empty() {
                    decoded.push(Value::Null);
                } else {
                    let inner: serde_json::Value = serde_json::from_str(text)?;
                    decoded.push(Value::from(inner));
                }
            }
            return Ok(Value::Array(decoded));
        }
    }

    Ok(promote_timestamps(parsed))
}

/// Tree-walk pass converting ISO-8601-looking string leaves into rich
/// timestamps. Runs after deserialization so the behavior is testable on
/// its own.
pub fn promote_timestamps(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::String(s) => match timestamp::parse_iso8601(&s) {
            Some(dt) => Value::DateTime(dt),
            None => Value::String(s),
        },
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(promote_timestamps).collect())
        }
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, promote_timestamps(value)))
                .collect(),
        ),
        other => Value::from(other),
    }
}
