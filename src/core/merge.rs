//! Deep merge of JSON values.
//!
//! Objects are merged key by key, recursively. On any other combination the
//! right-hand value replaces the left-hand one, including arrays: an array is
//! never merged index-wise, the later array wins as a whole.

use serde_json::{Map, Value};

/// Merge `source` into `target`, with `source` taking precedence.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            merge_maps(target_map, source_map);
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// Merge every entry of `source` into `target`.
pub fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn merged(left: Value, right: Value) -> Value {
        let mut target = left;
        deep_merge(&mut target, &right);
        target
    }

    #[test]
    fn test_disjoint_objects_union() {
        assert_eq!(
            merged(json!({"color": "red"}), json!({"greet": "hi"})),
            json!({"color": "red", "greet": "hi"})
        );
    }

    #[test]
    fn test_nested_objects_merge_recursively() {
        assert_eq!(
            merged(
                json!({"form": {"title": "T", "submit": "Go"}}),
                json!({"form": {"submit": "Send", "cancel": "No"}})
            ),
            json!({"form": {"title": "T", "submit": "Send", "cancel": "No"}})
        );
    }

    #[test]
    fn test_right_scalar_wins() {
        assert_eq!(merged(json!({"a": 1}), json!({"a": 2})), json!({"a": 2}));
        assert_eq!(merged(json!("left"), json!("right")), json!("right"));
    }

    #[test]
    fn test_type_conflict_right_wins() {
        assert_eq!(
            merged(json!({"a": {"b": 1}}), json!({"a": "flat"})),
            json!({"a": "flat"})
        );
        assert_eq!(
            merged(json!({"a": "flat"}), json!({"a": {"b": 1}})),
            json!({"a": {"b": 1}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_merged() {
        assert_eq!(
            merged(json!({"list": ["a", "b", "c"]}), json!({"list": ["x"]})),
            json!({"list": ["x"]})
        );
    }

    #[test]
    fn test_null_on_right_overrides() {
        assert_eq!(merged(json!({"a": "x"}), json!({"a": null})), json!({"a": null}));
    }

    #[test]
    fn test_key_order_left_then_new_right_keys() {
        let value = merged(json!({"b": 1, "a": 1}), json!({"c": 2, "a": 2}));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"b":1,"a":2,"c":2}"#
        );
    }
}
