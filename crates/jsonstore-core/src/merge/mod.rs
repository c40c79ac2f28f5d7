//! Deep merge of JSON trees.
//!
//! Used by `FileStore::update` to lay a partial patch over the current,
//! validated contents of a store file.
//!
//! Merge rules, decided by the kind of the *patch* value at each key:
//!
//! | Patch value | Key in base?   | Result                               |
//! |-------------|----------------|--------------------------------------|
//! | object      | yes, object    | recursive merge                      |
//! | object      | yes, other     | patch object replaces the base value |
//! | object      | no             | patch object, verbatim               |
//! | array       | any            | patch array replaces (no concat)     |
//! | scalar      | any            | patch scalar replaces                |
//! | null        | any            | `null` replaces                      |
//!
//! Keys that appear only in the base are kept unchanged.  Neither input is
//! modified; the merged tree is a new value.

use serde_json::{Map, Value};
use tracing::trace;

/// The closed set of node kinds the merge distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A JSON object (string-keyed map).
    Object,
    /// A JSON array.
    Array,
    /// A string, number or boolean.
    Scalar,
    /// JSON `null`.
    Null,
}

impl NodeKind {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::Null => NodeKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
        }
    }
}

/// Merges `patch` on top of `base` and returns the combined tree.
///
/// When both values are objects they are merged key by key (see the module
/// docs for the per-kind rules).  In every other combination the patch wins
/// outright, including an object patch over a non-object base.
///
/// # Examples
///
/// ```rust
/// use jsonstore_core::deep_merge;
/// use serde_json::json;
///
/// let base = json!({ "theme": "light", "nested": { "a": 1, "b": 2 } });
/// let patch = json!({ "nested": { "b": 3 } });
///
/// let merged = deep_merge(&base, &patch);
/// assert_eq!(merged, json!({ "theme": "light", "nested": { "a": 1, "b": 3 } }));
/// ```
pub fn deep_merge(base: &Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            Value::Object(merge_objects(base_map, patch_map))
        }
        _ => patch.clone(),
    }
}

fn merge_objects(base: &Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = Map::with_capacity(base.len() + patch.len());

    // Base keys first so the merged object keeps the base's key order.
    for (key, base_value) in base {
        let value = match patch.get(key) {
            Some(patch_value) => merge_entry(key, base_value, patch_value),
            None => base_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    for (key, patch_value) in patch {
        if !base.contains_key(key) {
            merged.insert(key.clone(), patch_value.clone());
        }
    }

    merged
}

fn merge_entry(key: &str, base_value: &Value, patch_value: &Value) -> Value {
    match NodeKind::of(patch_value) {
        NodeKind::Object => {
            let base_kind = NodeKind::of(base_value);
            if base_kind != NodeKind::Object {
                trace!("merge: object patch replaces {base_kind:?} value at key {key:?}");
            }
            deep_merge(base_value, patch_value)
        }
        NodeKind::Array | NodeKind::Scalar | NodeKind::Null => patch_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── NodeKind ──────────────────────────────────────────────────────────────

    #[test]
    fn test_node_kind_classifies_every_json_variant() {
        assert_eq!(NodeKind::of(&json!({})), NodeKind::Object);
        assert_eq!(NodeKind::of(&json!([1, 2])), NodeKind::Array);
        assert_eq!(NodeKind::of(&json!("text")), NodeKind::Scalar);
        assert_eq!(NodeKind::of(&json!(4.5)), NodeKind::Scalar);
        assert_eq!(NodeKind::of(&json!(false)), NodeKind::Scalar);
        assert_eq!(NodeKind::of(&Value::Null), NodeKind::Null);
    }

    // ── Object merging ────────────────────────────────────────────────────────

    #[test]
    fn test_nested_object_merges_key_by_key() {
        // Arrange
        let base = json!({ "theme": "light", "nested": { "a": 1, "b": 2 } });
        let patch = json!({ "nested": { "b": 3 } });

        // Act
        let merged = deep_merge(&base, &patch);

        // Assert
        assert_eq!(merged, json!({ "theme": "light", "nested": { "a": 1, "b": 3 } }));
    }

    #[test]
    fn test_keys_only_in_base_are_preserved() {
        let base = json!({ "a": 1, "b": { "c": true } });
        let patch = json!({ "d": "new" });

        let merged = deep_merge(&base, &patch);

        assert_eq!(merged, json!({ "a": 1, "b": { "c": true }, "d": "new" }));
    }

    #[test]
    fn test_new_nested_object_is_taken_verbatim() {
        let base = json!({ "a": 1 });
        let patch = json!({ "window": { "width": 800, "height": 600 } });

        let merged = deep_merge(&base, &patch);

        assert_eq!(merged["window"], json!({ "width": 800, "height": 600 }));
    }

    #[test]
    fn test_three_levels_deep_merge() {
        let base = json!({ "l1": { "l2": { "l3": { "x": 1, "y": 2 }, "keep": "me" } } });
        let patch = json!({ "l1": { "l2": { "l3": { "y": 20, "z": 30 } } } });

        let merged = deep_merge(&base, &patch);

        assert_eq!(
            merged,
            json!({ "l1": { "l2": { "l3": { "x": 1, "y": 20, "z": 30 }, "keep": "me" } } })
        );
    }

    #[test]
    fn test_merged_object_keeps_base_key_order_then_new_keys() {
        let base = json!({ "zeta": 1, "alpha": 2 });
        let patch = json!({ "beta": 3, "zeta": 10 });

        let merged = deep_merge(&base, &patch);

        let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "beta"]);
    }

    // ── Replacement rules ─────────────────────────────────────────────────────

    #[test]
    fn test_array_in_patch_replaces_base_array() {
        let base = json!({ "recent": ["a.txt", "b.txt", "c.txt"] });
        let patch = json!({ "recent": ["z.txt"] });

        let merged = deep_merge(&base, &patch);

        assert_eq!(merged["recent"], json!(["z.txt"]));
    }

    #[test]
    fn test_array_in_patch_replaces_base_object() {
        let base = json!({ "value": { "a": 1 } });
        let patch = json!({ "value": [1, 2] });

        assert_eq!(deep_merge(&base, &patch)["value"], json!([1, 2]));
    }

    #[test]
    fn test_scalar_in_patch_overrides_base_scalar() {
        let base = json!({ "volume": 10 });
        let patch = json!({ "volume": 80 });

        assert_eq!(deep_merge(&base, &patch)["volume"], 80);
    }

    #[test]
    fn test_scalar_in_patch_replaces_base_object() {
        let base = json!({ "proxy": { "host": "localhost", "port": 8080 } });
        let patch = json!({ "proxy": "direct" });

        assert_eq!(deep_merge(&base, &patch)["proxy"], "direct");
    }

    #[test]
    fn test_null_in_patch_overrides_any_base_value() {
        let base = json!({ "a": 1, "b": { "c": 2 }, "d": [1] });
        let patch = json!({ "a": null, "b": null, "d": null });

        let merged = deep_merge(&base, &patch);

        assert!(merged["a"].is_null());
        assert!(merged["b"].is_null());
        assert!(merged["d"].is_null());
    }

    // ── Type mismatch: object patch over non-object base ─────────────────────

    #[test]
    fn test_object_patch_over_scalar_base_replaces_it() {
        let base = json!({ "font": "mono" });
        let patch = json!({ "font": { "family": "mono", "size": 12 } });

        let merged = deep_merge(&base, &patch);

        assert_eq!(merged["font"], json!({ "family": "mono", "size": 12 }));
    }

    #[test]
    fn test_object_patch_over_array_base_replaces_it() {
        let base = json!({ "items": ["x", "y"] });
        let patch = json!({ "items": { "0": "z" } });

        let merged = deep_merge(&base, &patch);

        assert_eq!(merged["items"], json!({ "0": "z" }));
    }

    #[test]
    fn test_object_patch_over_null_base_replaces_it() {
        let base = json!({ "last_window": null });
        let patch = json!({ "last_window": { "x": 10 } });

        assert_eq!(deep_merge(&base, &patch)["last_window"], json!({ "x": 10 }));
    }

    #[test]
    fn test_non_object_top_level_patch_wins() {
        assert_eq!(deep_merge(&json!({ "a": 1 }), &json!([1])), json!([1]));
        assert_eq!(deep_merge(&json!(3), &json!({ "a": 1 })), json!({ "a": 1 }));
    }

    // ── Purity ────────────────────────────────────────────────────────────────

    #[test]
    fn test_inputs_are_not_modified() {
        let base = json!({ "nested": { "a": 1 }, "list": [1, 2] });
        let patch = json!({ "nested": { "b": 2 }, "list": [3] });
        let base_before = base.clone();
        let patch_before = patch.clone();

        let _ = deep_merge(&base, &patch);

        assert_eq!(base, base_before);
        assert_eq!(patch, patch_before);
    }

    #[test]
    fn test_empty_patch_returns_base() {
        let base = json!({ "a": 1, "b": { "c": [1, 2] } });

        assert_eq!(deep_merge(&base, &json!({})), base);
    }
}
