// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request and response envelope types for the dispatch layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{Map, Value};

// ---------------------------------------------------------------------------
// ApiResult
// ---------------------------------------------------------------------------

/// Uniform success/failure envelope returned by every dispatched request.
///
/// Constructed once from the HTTP outcome and immutable thereafter. A failed
/// request is observable via `ok == false` and `error`; dispatch never
/// raises.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    /// Response payload (`data` field of the wire response). Empty mapping
    /// when the server sent none.
    pub data: Value,
    /// Response metadata (`meta` field of the wire response).
    pub meta: Value,
    /// Whether the request succeeded.
    pub ok: bool,
    /// Error message on failure.
    pub error: Option<String>,
    /// HTTP status code of the outcome (500 for transport exceptions).
    pub status_code: u16,
}

impl ApiResult {
    /// Build a success envelope.
    pub fn success(data: Value, meta: Value, status_code: u16) -> Self {
        Self {
            data,
            meta,
            ok: true,
            error: None,
            status_code,
        }
    }

    /// Build a failure envelope. `data` and `meta` are empty mappings.
    pub fn failure(error: impl Into<String>, status_code: u16) -> Self {
        Self {
            data: Value::empty_object(),
            meta: Value::empty_object(),
            ok: false,
            error: Some(error.into()),
            status_code,
        }
    }

    /// Render the envelope back into a value mapping.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("data".into(), self.data.clone());
        map.insert("meta".into(), self.meta.clone());
        map.insert("ok".into(), Value::Bool(self.ok));
        map.insert(
            "error".into(),
            self.error.clone().map_or(Value::Null, Value::String),
        );
        map.insert("status_code".into(), Value::from(u64::from(self.status_code)));
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Builder for action payloads.
///
/// Every Omnibase capability is invoked by POSTing a mapping with an
/// `action` field plus action-specific fields. The builder guarantees the
/// `action` field by construction, replacing free-form payload shaping.
///
/// # Examples
///
/// ```
/// use omnibase_client::Payload;
///
/// let payload = Payload::new("doc.fetch")
///     .field("collection", "articles")
///     .field("limit", 10i64)
///     .into_value();
/// assert_eq!(payload.get("action").and_then(|a| a.as_str()), Some("doc.fetch"));
/// ```
#[derive(Debug, Clone)]
pub struct Payload {
    action: String,
    fields: Map,
}

impl Payload {
    /// Start a payload for the given action (e.g. `"doc.fetch"`,
    /// `"auth.signin"`, `"vector.search"`).
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Map::new(),
        }
    }

    /// Add one field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add every entry of a mapping.
    pub fn fields(mut self, map: Map) -> Self {
        self.fields.extend(map);
        self
    }

    /// The action this payload invokes.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Render the payload as a value mapping carrying the `action` field.
    pub fn into_value(self) -> Value {
        let mut map = self.fields;
        map.insert("action".into(), Value::String(self.action));
        Value::Object(map)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}

// ---------------------------------------------------------------------------
// PresignedPost
// ---------------------------------------------------------------------------

/// A presigned direct-to-storage upload target issued by the remote service:
/// a time-limited URL plus the form fields that must accompany the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedPost {
    /// Upload URL.
    pub url: String,
    /// Form fields to send alongside the file content.
    pub fields: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_action() {
        let value = Payload::new("auth.nonce").into_value();
        assert_eq!(value.get("action").and_then(Value::as_str), Some("auth.nonce"));
    }

    #[test]
    fn test_payload_action_wins_over_field_collision() {
        let value = Payload::new("doc.fetch")
            .field("action", "spoofed")
            .into_value();
        assert_eq!(value.get("action").and_then(Value::as_str), Some("doc.fetch"));
    }

    #[test]
    fn test_api_result_to_value() {
        let res = ApiResult::failure("not found", 404);
        let value = res.to_value();
        assert_eq!(value.get("ok"), Some(&Value::Bool(false)));
        assert_eq!(value.get("error").and_then(Value::as_str), Some("not found"));
        assert_eq!(value.get("status_code"), Some(&Value::from(404u64)));
    }

    #[test]
    fn test_presigned_post_deserializes() {
        let post: PresignedPost = serde_json::from_value(serde_json::json!({
            "url": "https://storage.example/bucket",
            "fields": {"key": "uploads/a.txt", "policy": "abc"}
        }))
        .unwrap();
        assert_eq!(post.fields.len(), 2);
        assert_eq!(post.url, "https://storage.example/bucket");
    }
}
