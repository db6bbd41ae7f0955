// SPDX-License-Identifier: PMPL-1.0-or-later

//! Deep merge of nested mappings.

use std::collections::BTreeSet;

use crate::value::{Map, Value};

/// Merge any number of nested mappings into one.
///
/// The output holds the union of all keys. For each key, mapping-valued
/// occurrences are merged recursively; once any layer holds a mapping for a
/// key, non-mapping occurrences of that key are silently dropped. When no
/// layer holds a mapping, the last layer's value wins.
pub fn deep_merge(layers: &[&Map]) -> Map {
    let mut out = Map::new();
    let keys: BTreeSet<&String> = layers.iter().flat_map(|layer| layer.keys()).collect();

    for key in keys {
        let present: Vec<&Value> = layers.iter().filter_map(|layer| layer.get(key)).collect();
        let maps: Vec<&Map> = present
            .iter()
            .filter_map(|value| value.as_object())
            .collect();

        let merged = if maps.is_empty() {
            match present.last() {
                Some(value) => (*value).clone(),
                None => continue,
            }
        } else {
            Value::Object(deep_merge(&maps))
        };
        out.insert(key.clone(), merged);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(raw: serde_json::Value) -> Map {
        match Value::from(raw) {
            Value::Object(m) => m,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_single_argument_is_identity() {
        let m = map(serde_json::json!({"a": {"b": [1, 2]}, "c": null}));
        assert_eq!(deep_merge(&[&m]), m);
    }

    #[test]
    fn test_right_bias_on_scalars() {
        let left = map(serde_json::json!({"a": 1}));
        let right = map(serde_json::json!({"a": 2}));
        assert_eq!(deep_merge(&[&left, &right]), map(serde_json::json!({"a": 2})));
    }

    #[test]
    fn test_mappings_merge_recursively() {
        let left = map(serde_json::json!({"a": {"x": 1}}));
        let right = map(serde_json::json!({"a": {"y": 2}}));
        assert_eq!(
            deep_merge(&[&left, &right]),
            map(serde_json::json!({"a": {"x": 1, "y": 2}}))
        );
    }

    #[test]
    fn test_mapping_beats_scalar_regardless_of_order() {
        // Source behavior preserved: once any layer holds a mapping for a
        // key, non-mapping values for that key are dropped.
        let scalar = map(serde_json::json!({"a": 1}));
        let mapping = map(serde_json::json!({"a": {"x": 2}}));
        let expected = map(serde_json::json!({"a": {"x": 2}}));
        assert_eq!(deep_merge(&[&scalar, &mapping]), expected);
        assert_eq!(deep_merge(&[&mapping, &scalar]), expected);
    }

    #[test]
    fn test_three_way_merge() {
        let a = map(serde_json::json!({"k": 1, "nested": {"a": 1}}));
        let b = map(serde_json::json!({"k": 2, "nested": {"b": 2}, "only_b": true}));
        let c = map(serde_json::json!({"k": 3, "nested": {"a": 9}}));
        assert_eq!(
            deep_merge(&[&a, &b, &c]),
            map(serde_json::json!({
                "k": 3,
                "nested": {"a": 9, "b": 2},
                "only_b": true
            }))
        );
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        assert!(deep_merge(&[]).is_empty());
    }
}
